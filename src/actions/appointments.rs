// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Slots, booking, and appointment status changes.

use chrono::NaiveDate;
use tracing::info;

use super::{bearer, expect_success, read_json, ActionResult, GENERIC_FAILURE};
use crate::auth::Session;
use crate::client::{ApiRequest, BackendClient};
use crate::models::{
    Appointment, AppointmentStatus, BookAppointmentRequest, BookingConfirmation, BookingPayload,
    DoctorAppointments, Slot, UpdateStatusRequest,
};

/// Open slots for `doctor_id` on `date`.
pub async fn available_slots(
    client: &BackendClient,
    session: &Session,
    doctor_id: &str,
    date: NaiveDate,
) -> ActionResult<Vec<Slot>> {
    let request = ApiRequest::get(["appointment", "slots", ""])
        .query("doctorId", doctor_id)
        .query("date", date.to_string())
        .bearer(bearer(session)?);
    read_json(client.send(request).await?, "Failed to fetch slots").await
}

/// Book a slot with `doctor_id` for the session's user.
pub async fn book(
    client: &BackendClient,
    session: &Session,
    doctor_id: &str,
    form: &BookAppointmentRequest,
) -> ActionResult<BookingConfirmation> {
    form.validate()?;
    let payload = BookingPayload {
        doctor_id: doctor_id.to_string(),
        user_id: session.user_id.clone(),
        date: form.date,
        start_time: form.start_time.clone(),
    };
    let request = ApiRequest::post(["appointment", "book"])
        .bearer(bearer(session)?)
        .json(&payload)?;
    let confirmation = read_json(client.send(request).await?, GENERIC_FAILURE).await?;

    info!(
        user_id = %session.user_id,
        doctor_id,
        date = %form.date,
        start_time = %form.start_time,
        "Appointment booked"
    );
    Ok(confirmation)
}

/// Appointments booked by the session's user.
pub async fn patient_appointments(
    client: &BackendClient,
    session: &Session,
) -> ActionResult<Vec<Appointment>> {
    let request = ApiRequest::get(["appointment", "my-appointments", session.user_id.as_str()])
        .bearer(bearer(session)?);
    read_json(client.send(request).await?, GENERIC_FAILURE).await
}

/// Appointments assigned to `doctor_id`.
pub async fn doctor_appointments(
    client: &BackendClient,
    session: &Session,
    doctor_id: &str,
) -> ActionResult<Vec<Appointment>> {
    let request =
        ApiRequest::get(["doctor", "appointments", doctor_id]).bearer(bearer(session)?);
    let body: DoctorAppointments =
        read_json(client.send(request).await?, "Failed to fetch Appointments").await?;
    Ok(body.into_vec())
}

pub async fn update_status(
    client: &BackendClient,
    session: &Session,
    appointment_id: &str,
    status: AppointmentStatus,
) -> ActionResult<()> {
    let request = ApiRequest::put(["appointment", "update", appointment_id])
        .bearer(bearer(session)?)
        .json(&UpdateStatusRequest { new_status: status })?;
    expect_success(client.send(request).await?, GENERIC_FAILURE).await?;

    info!(user_id = %session.user_id, appointment_id, %status, "Appointment status updated");
    Ok(())
}

pub async fn cancel(
    client: &BackendClient,
    session: &Session,
    appointment_id: &str,
) -> ActionResult<()> {
    update_status(client, session, appointment_id, AppointmentStatus::Cancelled).await
}
