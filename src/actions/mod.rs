// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Backend Actions
//!
//! One function per backend operation. Each action validates its input,
//! sends a single logical request through the retrying [`BackendClient`],
//! and turns the outcome into an [`ActionResult`]:
//!
//! - success body decoded into a typed record
//! - 4xx response: [`ActionError::Rejected`] carrying the backend message
//! - backend unreachable or still failing after retries: [`ActionError::Unavailable`]
//!
//! [`BackendClient`]: crate::client::BackendClient

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod doctors;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::client::ClientError;
use crate::models::{BackendMessage, ValidationError};

/// Fallback message when the backend gives no reason for a failure.
pub const GENERIC_FAILURE: &str = "Sorry something went wrong";

/// Expected failure of a backend action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("{0}")]
    Invalid(String),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Malformed(String),
}

pub type ActionResult<T> = Result<T, ActionError>;

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        ActionError::Invalid(err.0)
    }
}

impl From<ClientError> for ActionError {
    fn from(err: ClientError) -> Self {
        if err.is_unavailable() {
            warn!(error = %err, "Backend unavailable");
        }
        ActionError::Unavailable(err.to_string())
    }
}

/// Bearer token of `session`, refusing blank tokens before any request.
pub(crate) fn bearer(session: &Session) -> ActionResult<&str> {
    let token = session.token.trim();
    if token.is_empty() {
        return Err(ActionError::Unauthenticated);
    }
    Ok(token)
}

/// Pass through a success response; turn anything else into `Rejected`.
pub(crate) async fn expect_success(response: Response, fallback: &str) -> ActionResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<BackendMessage>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    debug!(%status, message = %message, "Backend rejected request");
    Err(ActionError::Rejected { status, message })
}

/// Decode a success body as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> ActionResult<T> {
    let response = expect_success(response, fallback).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ActionError::Malformed(format!("Unexpected response from backend: {e}")))
}
