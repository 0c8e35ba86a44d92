// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Doctor directory and hospital doctor management.

use tracing::info;

use super::{bearer, read_json, ActionResult, GENERIC_FAILURE};
use crate::auth::Session;
use crate::client::{ApiRequest, BackendClient};
use crate::models::{
    BackendMessage, CreateDoctorRequest, Doctor, HospitalDoctors, UpdateDoctorRequest,
};

const FETCH_DOCTORS_FAILED: &str = "Failed to fetch doctors";

/// All doctors across all hospitals.
pub async fn list_doctors(client: &BackendClient, session: &Session) -> ActionResult<Vec<Doctor>> {
    let request = ApiRequest::get(["doctor"]).bearer(bearer(session)?);
    read_json(client.send(request).await?, FETCH_DOCTORS_FAILED).await
}

pub async fn get_doctor(
    client: &BackendClient,
    session: &Session,
    doctor_id: &str,
) -> ActionResult<Doctor> {
    let request = ApiRequest::get(["doctor", doctor_id]).bearer(bearer(session)?);
    read_json(client.send(request).await?, FETCH_DOCTORS_FAILED).await
}

/// Doctors at the calling admin's hospital.
pub async fn hospital_doctors(
    client: &BackendClient,
    session: &Session,
) -> ActionResult<Vec<Doctor>> {
    let request = ApiRequest::get(["doctor", "hospital"]).bearer(bearer(session)?);
    let body: HospitalDoctors = read_json(client.send(request).await?, GENERIC_FAILURE).await?;
    Ok(body.doctors)
}

pub async fn register_doctor(
    client: &BackendClient,
    session: &Session,
    form: &CreateDoctorRequest,
) -> ActionResult<BackendMessage> {
    form.validate()?;
    let request = ApiRequest::post(["doctor", "register"])
        .bearer(bearer(session)?)
        .json(form)?;
    let message = read_json(client.send(request).await?, GENERIC_FAILURE).await?;

    info!(admin_id = %session.user_id, email = %form.email, "Doctor registered");
    Ok(message)
}

pub async fn update_doctor(
    client: &BackendClient,
    session: &Session,
    doctor_id: &str,
    form: &UpdateDoctorRequest,
) -> ActionResult<BackendMessage> {
    form.validate()?;
    let request = ApiRequest::put(["doctor", doctor_id])
        .bearer(bearer(session)?)
        .json(form)?;
    let message = read_json(client.send(request).await?, GENERIC_FAILURE).await?;

    info!(admin_id = %session.user_id, doctor_id, "Doctor updated");
    Ok(message)
}

pub async fn delete_doctor(
    client: &BackendClient,
    session: &Session,
    doctor_id: &str,
) -> ActionResult<BackendMessage> {
    let request = ApiRequest::delete(["doctor", doctor_id]).bearer(bearer(session)?);
    let message = read_json(client.send(request).await?, GENERIC_FAILURE).await?;

    info!(admin_id = %session.user_id, doctor_id, "Doctor deleted");
    Ok(message)
}
