// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin dashboard: hospital appointments, patients and doctors.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    actions,
    auth::CurrentSession,
    dashboard::{AppointmentFilter, AppointmentSummary},
    error::{ApiError, ErrorBody},
    models::{
        Appointment, AppointmentStatus, BackendMessage, CreateDoctorRequest, Doctor, Patient,
        UpdateDoctorRequest, UpdateStatusRequest,
    },
    state::AppState,
};

pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Admin dashboard view model.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    /// Counts over all hospital appointments, ignoring the filter.
    pub summary: AppointmentSummary,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdated {
    pub id: String,
    pub status: AppointmentStatus,
}

#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin",
    responses((status = 307, description = "Redirect to /admin/dashboard"))
)]
pub async fn index() -> Redirect {
    Redirect::temporary(DASHBOARD_PATH)
}

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    params(AppointmentFilter),
    tag = "Admin",
    responses(
        (status = 200, body = AdminDashboard),
        (status = 502, description = "Backend unavailable", body = ErrorBody)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<AdminDashboard>, ApiError> {
    let appointments = actions::admin::all_appointments(&state.backend, &session).await?;
    let summary = AppointmentSummary::now(&appointments);
    Ok(Json(AdminDashboard {
        summary,
        appointments: filter.apply(appointments),
    }))
}

#[utoipa::path(
    put,
    path = "/admin/appointments/{appointment_id}/status",
    params(("appointment_id" = String, Path, description = "Appointment to update")),
    request_body = UpdateStatusRequest,
    tag = "Admin",
    responses(
        (status = 200, body = StatusUpdated),
        (status = 404, description = "Unknown appointment", body = ErrorBody)
    )
)]
pub async fn update_appointment_status(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<StatusUpdated>, ApiError> {
    actions::appointments::update_status(
        &state.backend,
        &session,
        &appointment_id,
        request.new_status,
    )
    .await?;
    Ok(Json(StatusUpdated {
        id: appointment_id,
        status: request.new_status,
    }))
}

#[utoipa::path(
    get,
    path = "/admin/patients",
    tag = "Admin",
    responses((status = 200, body = [Patient]))
)]
pub async fn list_patients(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = actions::admin::hospital_patients(&state.backend, &session).await?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/admin/doctors",
    tag = "Admin",
    responses((status = 200, body = [Doctor]))
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let doctors = actions::doctors::hospital_doctors(&state.backend, &session).await?;
    Ok(Json(doctors))
}

#[utoipa::path(
    post,
    path = "/admin/doctors",
    request_body = CreateDoctorRequest,
    tag = "Admin",
    responses(
        (status = 201, body = BackendMessage),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn create_doctor(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<BackendMessage>), ApiError> {
    let message = actions::doctors::register_doctor(&state.backend, &session, &request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    put,
    path = "/admin/doctors/{doctor_id}",
    params(("doctor_id" = String, Path, description = "Doctor to update")),
    request_body = UpdateDoctorRequest,
    tag = "Admin",
    responses((status = 200, body = BackendMessage))
)]
pub async fn update_doctor(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(doctor_id): Path<String>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<BackendMessage>, ApiError> {
    let message =
        actions::doctors::update_doctor(&state.backend, &session, &doctor_id, &request).await?;
    Ok(Json(message))
}

#[utoipa::path(
    delete,
    path = "/admin/doctors/{doctor_id}",
    params(("doctor_id" = String, Path, description = "Doctor to delete")),
    tag = "Admin",
    responses((status = 200, body = BackendMessage))
)]
pub async fn delete_doctor(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(doctor_id): Path<String>,
) -> Result<Json<BackendMessage>, ApiError> {
    let message = actions::doctors::delete_doctor(&state.backend, &session, &doctor_id).await?;
    Ok(Json(message))
}
