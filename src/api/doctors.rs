// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    actions,
    auth::CurrentSession,
    dashboard::{sort_by_priority, AppointmentFilter, AppointmentSummary},
    error::{ApiError, ErrorBody},
    models::Appointment,
    state::AppState,
};

/// Doctor dashboard view model.
#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorDashboard {
    pub summary: AppointmentSummary,
    pub appointments: Vec<Appointment>,
}

/// The logged-in doctor's appointments, filtered and ordered by status.
#[utoipa::path(
    get,
    path = "/doctors",
    params(AppointmentFilter),
    tag = "Doctors",
    responses(
        (status = 200, body = DoctorDashboard),
        (status = 502, description = "Backend unavailable", body = ErrorBody)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<DoctorDashboard>, ApiError> {
    let appointments =
        actions::appointments::doctor_appointments(&state.backend, &session, &session.user_id)
            .await?;
    let summary = AppointmentSummary::now(&appointments);

    let mut appointments = filter.apply(appointments);
    sort_by_priority(&mut appointments);

    Ok(Json(DoctorDashboard {
        summary,
        appointments,
    }))
}
