// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Rejection raised when a handler needs a session the request does not carry.
#[derive(Debug)]
pub enum AuthError {
    /// None of the session cookies are present
    MissingSession,
    /// Some but not all session cookies are present
    IncompleteSession,
    /// The role cookie holds an unknown role
    InvalidRole,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingSession => "missing_session",
            AuthError::IncompleteSession => "incomplete_session",
            AuthError::InvalidRole => "invalid_role",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingSession => write!(f, "Unauthorized"),
            AuthError::IncompleteSession => {
                write!(f, "Session is incomplete, please log in again")
            }
            AuthError::InvalidRole => write!(f, "Session role is not recognized"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
