// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and patient self-registration.

use tracing::info;

use super::{read_json, ActionResult, GENERIC_FAILURE};
use crate::client::{ApiRequest, BackendClient};
use crate::models::{
    LoginRequest, LoginResponse, RegisterPatientRequest, RegisterResponse, RegistrationOutcome,
};

const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Exchange credentials for a backend token.
pub async fn login(client: &BackendClient, request: &LoginRequest) -> ActionResult<LoginResponse> {
    request.validate()?;

    let response = client
        .send(ApiRequest::post(["admin", "login"]).json(request)?)
        .await?;
    let login: LoginResponse = read_json(response, GENERIC_FAILURE).await?;

    info!(user_id = %login.user.id, role = %login.user.role, "User logged in");
    Ok(login)
}

/// Register a new patient account. Fields are sent as a multipart form.
pub async fn register_patient(
    client: &BackendClient,
    request: &RegisterPatientRequest,
) -> ActionResult<RegistrationOutcome> {
    request.validate()?;

    let response = client
        .send(ApiRequest::post(["patient", "register"]).form(request.form_fields()))
        .await?;
    let registered: RegisterResponse = read_json(response, REGISTRATION_FAILED).await?;

    info!("Patient registered");
    Ok(RegistrationOutcome {
        message: "Registration successful!".to_string(),
        user: registered.user,
    })
}
