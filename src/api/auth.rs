// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    actions,
    auth::{guard::LOGIN_PATH, session, Session},
    error::{ApiError, ErrorBody},
    models::{AuthUser, LoginRequest, RegisterPatientRequest, UserProfile},
    state::AppState,
};

/// Successful login: the session cookies are set on the response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginView {
    pub message: String,
    pub user: AuthUser,
    /// Dashboard to navigate to next.
    pub redirect: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterView {
    pub message: String,
    pub user: Option<UserProfile>,
    pub redirect: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnauthorizedView {
    pub error: String,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Logged in, session cookies set", body = LoginView),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody),
        (status = 502, description = "Backend unavailable", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginView>), ApiError> {
    let login = actions::auth::login(&state.backend, &request).await?;

    let session = Session::new(login.user.id.clone(), login.user.role, login.access_token);
    let jar = session::establish(jar, &session, state.cookie_secure);

    Ok((
        jar,
        Json(LoginView {
            message: login
                .message
                .unwrap_or_else(|| "Login successful".to_string()),
            redirect: session.role.home_path().to_string(),
            user: login.user,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterPatientRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Patient registered", body = RegisterView),
        (status = 409, description = "Account already exists", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<RegisterView>), ApiError> {
    let outcome = actions::auth::register_patient(&state.backend, &request).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterView {
            message: outcome.message,
            user: outcome.user,
            redirect: LOGIN_PATH.to_string(),
        }),
    ))
}

/// Clear the session and send the browser to the login page.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses((status = 303, description = "Session cleared, redirect to /login"))
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (session::teardown(jar), Redirect::to(LOGIN_PATH))
}

#[utoipa::path(
    get,
    path = "/unauthorized",
    tag = "Auth",
    responses((status = 403, body = UnauthorizedView))
)]
pub async fn unauthorized() -> (StatusCode, Json<UnauthorizedView>) {
    (
        StatusCode::FORBIDDEN,
        Json(UnauthorizedView {
            error: "Unauthorized".to_string(),
            message: "You do not have permission to access this page.".to_string(),
        }),
    )
}
