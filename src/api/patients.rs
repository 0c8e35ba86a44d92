// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Patient dashboard: own appointments, doctor directory and booking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::admin::StatusUpdated;
use crate::{
    actions,
    auth::CurrentSession,
    dashboard::{sort_by_priority, AppointmentSummary},
    error::{ApiError, ErrorBody},
    models::{
        Appointment, AppointmentStatus, BookAppointmentRequest, BookingConfirmation, Doctor, Slot,
    },
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientDashboard {
    pub summary: AppointmentSummary,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotQuery {
    /// Day to list slots for (`YYYY-MM-DD`)
    pub date: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/patients",
    tag = "Patients",
    responses(
        (status = 200, body = PatientDashboard),
        (status = 502, description = "Backend unavailable", body = ErrorBody)
    )
)]
pub async fn home(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<PatientDashboard>, ApiError> {
    let mut appointments =
        actions::appointments::patient_appointments(&state.backend, &session).await?;
    sort_by_priority(&mut appointments);
    Ok(Json(PatientDashboard {
        summary: AppointmentSummary::now(&appointments),
        appointments,
    }))
}

#[utoipa::path(
    get,
    path = "/patients/appointments",
    tag = "Patients",
    responses((status = 200, body = [Appointment]))
)]
pub async fn my_appointments(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let mut appointments =
        actions::appointments::patient_appointments(&state.backend, &session).await?;
    sort_by_priority(&mut appointments);
    Ok(Json(appointments))
}

#[utoipa::path(
    post,
    path = "/patients/appointments/{appointment_id}/cancel",
    params(("appointment_id" = String, Path, description = "Appointment to cancel")),
    tag = "Patients",
    responses((status = 200, body = StatusUpdated))
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(appointment_id): Path<String>,
) -> Result<Json<StatusUpdated>, ApiError> {
    actions::appointments::cancel(&state.backend, &session, &appointment_id).await?;
    Ok(Json(StatusUpdated {
        id: appointment_id,
        status: AppointmentStatus::Cancelled,
    }))
}

#[utoipa::path(
    get,
    path = "/patients/doctors",
    tag = "Patients",
    responses((status = 200, body = [Doctor]))
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let doctors = actions::doctors::list_doctors(&state.backend, &session).await?;
    Ok(Json(doctors))
}

#[utoipa::path(
    get,
    path = "/patients/doctors/{doctor_id}",
    params(("doctor_id" = String, Path, description = "Doctor identifier")),
    tag = "Patients",
    responses(
        (status = 200, body = Doctor),
        (status = 404, description = "Unknown doctor", body = ErrorBody)
    )
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(doctor_id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let doctor = actions::doctors::get_doctor(&state.backend, &session, &doctor_id).await?;
    Ok(Json(doctor))
}

#[utoipa::path(
    get,
    path = "/patients/doctors/{doctor_id}/slots",
    params(
        ("doctor_id" = String, Path, description = "Doctor identifier"),
        SlotQuery
    ),
    tag = "Patients",
    responses((status = 200, body = [Slot]))
)]
pub async fn doctor_slots(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(doctor_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<Slot>>, ApiError> {
    let slots =
        actions::appointments::available_slots(&state.backend, &session, &doctor_id, query.date)
            .await?;
    Ok(Json(slots))
}

#[utoipa::path(
    post,
    path = "/patients/doctors/{doctor_id}/appointments",
    params(("doctor_id" = String, Path, description = "Doctor to book with")),
    request_body = BookAppointmentRequest,
    tag = "Patients",
    responses(
        (status = 201, body = BookingConfirmation),
        (status = 409, description = "Slot no longer available", body = ErrorBody),
        (status = 422, description = "No slot selected", body = ErrorBody)
    )
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(doctor_id): Path<String>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), ApiError> {
    let mut confirmation =
        actions::appointments::book(&state.backend, &session, &doctor_id, &request).await?;
    confirmation
        .message
        .get_or_insert_with(|| "Appointment booked successfully!".to_string());
    Ok((StatusCode::CREATED, Json(confirmation)))
}
