// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::actions::ActionError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Error envelope returned by every failing route.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::Unauthenticated => Self::unauthorized("Unauthorized"),
            ActionError::Invalid(message) => Self::unprocessable(message),
            ActionError::Rejected { status, message } if status.is_client_error() => {
                Self::new(status, message)
            }
            // Non-4xx rejections (3xx) surface as gateway failures.
            ActionError::Rejected { message, .. }
            | ActionError::Unavailable(message)
            | ActionError::Malformed(message) => Self::bad_gateway(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let unauth = ApiError::unauthorized("who");
        assert_eq!(unauth.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unauth.message, "who");

        let unp = ApiError::unprocessable("oops");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);

        let gw = ApiError::bad_gateway("down");
        assert_eq!(gw.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn action_errors_map_to_statuses() {
        let cases = [
            (ActionError::Unauthenticated, StatusCode::UNAUTHORIZED, "Unauthorized"),
            (
                ActionError::Invalid("Invalid email address".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid email address",
            ),
            (
                ActionError::Rejected {
                    status: StatusCode::CONFLICT,
                    message: "Slot already taken".into(),
                },
                StatusCode::CONFLICT,
                "Slot already taken",
            ),
            (
                ActionError::Rejected {
                    status: StatusCode::PERMANENT_REDIRECT,
                    message: "moved".into(),
                },
                StatusCode::BAD_GATEWAY,
                "moved",
            ),
            (
                ActionError::Unavailable("down".into()),
                StatusCode::BAD_GATEWAY,
                "down",
            ),
            (
                ActionError::Malformed("garbled".into()),
                StatusCode::BAD_GATEWAY,
                "garbled",
            ),
        ];

        for (action_error, status, message) in cases {
            let api_error = ApiError::from(action_error);
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.message, message);
        }
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::unprocessable("bad data").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
