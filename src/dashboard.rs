// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! View logic shared by the admin, doctor and patient dashboards.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Appointment, AppointmentStatus, Patient};

/// Headline counts shown above an appointment table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub today: usize,
    pub cancelled: usize,
    pub pending: usize,
    pub completed: usize,
    pub confirmed: usize,
}

impl AppointmentSummary {
    /// Count `appointments`, treating `today` as the current UTC date.
    pub fn from_appointments(appointments: &[Appointment], today: NaiveDate) -> Self {
        appointments.iter().fold(Self::default(), |mut summary, appointment| {
            if appointment
                .start_time
                .is_some_and(|start| start.date_naive() == today)
            {
                summary.today += 1;
            }
            match appointment.status {
                AppointmentStatus::Cancelled => summary.cancelled += 1,
                AppointmentStatus::Pending => summary.pending += 1,
                AppointmentStatus::Completed => summary.completed += 1,
                AppointmentStatus::Confirmed => summary.confirmed += 1,
            }
            summary
        })
    }

    pub fn now(appointments: &[Appointment]) -> Self {
        Self::from_appointments(appointments, Utc::now().date_naive())
    }
}

/// Stable sort: confirmed, pending, completed, cancelled.
pub fn sort_by_priority(appointments: &mut [Appointment]) {
    appointments.sort_by_key(|a| a.status.priority());
}

/// Search and status filter from the dashboard toolbar.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentFilter {
    /// Case-insensitive match on patient or doctor name
    pub q: Option<String>,
    /// `PENDING`, `CONFIRMED`, `COMPLETED`, `CANCELLED` or `ALL`
    pub status: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.matches_status(appointment) && self.matches_query(appointment)
    }

    fn matches_status(&self, appointment: &Appointment) -> bool {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(status) if status.eq_ignore_ascii_case("ALL") => true,
            Some(status) => appointment.status.as_str().eq_ignore_ascii_case(status),
        }
    }

    fn matches_query(&self, appointment: &Appointment) -> bool {
        let needle = match self.q.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(q) => q.to_lowercase(),
        };

        let patient = appointment.patient.as_ref().map(|p| &p.user);
        let doctor = appointment.doctor.as_ref().map(|d| &d.user);
        [patient, doctor]
            .into_iter()
            .flatten()
            .flat_map(|user| [&user.first_name, &user.last_name])
            .any(|name| name.to_lowercase().contains(&needle))
    }

    /// Keep only matching appointments.
    pub fn apply(&self, appointments: Vec<Appointment>) -> Vec<Appointment> {
        appointments.into_iter().filter(|a| self.matches(a)).collect()
    }
}

/// Patients appearing in `appointments`, first occurrence wins.
///
/// Patients without an id are keyed by email.
pub fn unique_patients(appointments: &[Appointment]) -> Vec<Patient> {
    let mut seen = HashSet::new();
    appointments
        .iter()
        .filter_map(|a| a.patient.as_ref())
        .filter(|patient| {
            let key = patient
                .id
                .clone()
                .or_else(|| patient.user.id.clone())
                .unwrap_or_else(|| patient.user.email.to_lowercase());
            seen.insert(key)
        })
        .cloned()
        .collect()
}
