// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response records exchanged with the PulseConnect backend and
//! returned to the dashboards. Wire names are camelCase to match the backend.
//! All types derive `Serialize`, `Deserialize`, and `ToSchema` for automatic
//! JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **People**: users, patients, doctors, hospitals
//! - **Appointments**: appointments, statuses, time slots
//! - **Forms**: login, registration, doctor management, booking
//!
//! Backend responses are decoded leniently: missing or `null` fields take their
//! defaults and timestamps may omit the UTC offset. Form records validate
//! themselves before any request is sent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// Validation
// =============================================================================

/// A form field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn ensure(condition: bool, message: &str) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError(message.to_string()))
    }
}

fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

// =============================================================================
// Lenient decoding
// =============================================================================

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps, offset-less date-times (read as UTC) and bare
/// dates. Anything else decodes to `None` rather than failing the record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

/// Parse a backend timestamp, tolerating a missing offset.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

// =============================================================================
// People
// =============================================================================

/// Postal address attached to users and hospitals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// Gender options accepted at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// A user record as embedded in backend responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    pub role: Option<Role>,
    pub gender: Option<String>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<String>,
    pub address: Option<Address>,
    pub id_number: Option<String>,
    pub is_active: Option<bool>,
}

/// The identity returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Hospital {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub address: Option<Address>,
}

/// A doctor as listed by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Doctor {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: UserProfile,
    pub hospital: Option<Hospital>,
    #[serde(deserialize_with = "null_as_default")]
    pub speciality: String,
    pub license_number: Option<String>,
    pub phone_number: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: UserProfile,
}

/// Doctor details embedded in an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentDoctor {
    pub id: Option<String>,
    pub speciality: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: UserProfile,
    pub hospital: Option<Hospital>,
}

// =============================================================================
// Appointments
// =============================================================================

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Display order on the dashboards: confirmed first, cancelled last.
    pub fn priority(&self) -> u8 {
        match self {
            AppointmentStatus::Confirmed => 1,
            AppointmentStatus::Pending => 2,
            AppointmentStatus::Completed => 3,
            AppointmentStatus::Cancelled => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub status: AppointmentStatus,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default)]
    pub patient: Option<Patient>,
    #[serde(default)]
    pub doctor: Option<AppointmentDoctor>,
    #[serde(default)]
    pub hospital: Option<Hospital>,
}

/// A bookable time slot. `start_time` is echoed back verbatim when booking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
}

// =============================================================================
// Auth Forms
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure(is_valid_email(&self.email), "Invalid email address")?;
        ensure(
            min_chars(&self.password, 6),
            "Password must be at least 6 characters",
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: AuthUser,
    pub access_token: String,
}

/// Patient self-registration form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
}

impl RegisterPatientRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure(
            ![&self.first_name, &self.last_name, &self.email, &self.password]
                .iter()
                .any(|v| is_blank(v)),
            "All required fields must be provided",
        )?;
        ensure(
            min_chars(&self.first_name, 2),
            "First name must be at least 2 characters",
        )?;
        ensure(
            min_chars(&self.last_name, 2),
            "Last name must be at least 2 characters",
        )?;
        ensure(is_valid_email(&self.email), "Invalid email address")?;
        ensure(
            min_chars(&self.password, 6),
            "Password must be at least 6 characters",
        )
    }

    /// Multipart text fields sent to the registration endpoint.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("firstName".to_string(), self.first_name.trim().to_string()),
            ("lastName".to_string(), self.last_name.trim().to_string()),
            ("email".to_string(), self.email.trim().to_string()),
            ("password".to_string(), self.password.clone()),
            ("gender".to_string(), self.gender.as_str().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterResponse {
    pub user: Option<UserProfile>,
    pub access_token: Option<String>,
}

/// Result of a successful patient registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationOutcome {
    pub message: String,
    pub user: Option<UserProfile>,
}

/// Generic `{message}` body returned by backend mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct BackendMessage {
    pub message: Option<String>,
}

// =============================================================================
// Doctor Management Forms
// =============================================================================

/// Address captured on the doctor registration form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAddress {
    #[serde(default)]
    pub street: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "Zimbabwe".to_string()
}

fn default_doctor_role() -> Role {
    Role::Doctor
}

fn default_true() -> bool {
    true
}

/// Admin form registering a doctor at the admin's hospital.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    pub gender: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_doctor_role")]
    pub role: Role,
    #[serde(default)]
    pub id_number: Option<String>,
    pub hospital_id: i64,
    #[serde(default = "default_true")]
    pub is_approved: bool,
    #[serde(default)]
    pub verification_document: Option<String>,
    pub phone_number: String,
    pub speciality: String,
    #[serde(default)]
    pub available_from: Option<String>,
    #[serde(default)]
    pub available_to: Option<String>,
    pub license_number: String,
    #[serde(default)]
    pub address: Option<DoctorAddress>,
}

impl CreateDoctorRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure(!is_blank(&self.first_name), "First name is required")?;
        ensure(!is_blank(&self.last_name), "Last name is required")?;
        ensure(!is_blank(&self.gender), "Gender is required")?;
        ensure(is_valid_email(&self.email), "Invalid email address")?;
        ensure(
            min_chars(&self.password, 6),
            "Password must be at least 6 characters",
        )?;
        ensure(
            matches!(self.role, Role::Doctor | Role::Admin),
            "Role must be DOCTOR or ADMIN",
        )?;
        ensure(!is_blank(&self.phone_number), "Phone number is required")?;
        ensure(!is_blank(&self.speciality), "Speciality is required")?;
        ensure(!is_blank(&self.license_number), "License number is required")?;
        if let Some(address) = &self.address {
            ensure(!is_blank(&address.city), "City is required")?;
        }
        Ok(())
    }
}

/// Admin form editing a doctor's contact details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl UpdateDoctorRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure(!is_blank(&self.first_name), "First name is required")?;
        ensure(!is_blank(&self.last_name), "Last name is required")?;
        ensure(is_valid_email(&self.email), "Invalid email address")?;
        ensure(!is_blank(&self.phone_number), "Phone number is required")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HospitalDoctors {
    pub doctors: Vec<Doctor>,
}

/// A doctor's appointment list. The backend answers either with a bare list
/// or wrapped in `{appointments}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DoctorAppointments {
    Wrapped { appointments: Vec<Appointment> },
    Bare(Vec<Appointment>),
}

impl DoctorAppointments {
    pub fn into_vec(self) -> Vec<Appointment> {
        match self {
            DoctorAppointments::Wrapped { appointments } | DoctorAppointments::Bare(appointments) => {
                appointments
            }
        }
    }
}

// =============================================================================
// Booking Forms
// =============================================================================

/// Patient form booking a slot with a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub date: NaiveDate,
    pub start_time: String,
}

impl BookAppointmentRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure(!is_blank(&self.start_time), "Please select a time slot.")
    }
}

/// Body sent to the backend booking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub doctor_id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub start_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookingConfirmation {
    pub message: Option<String>,
    pub appointment: Option<Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub new_status: AppointmentStatus,
}
