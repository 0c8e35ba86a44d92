// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cookie-backed session context.
//!
//! A session is three cookies written and cleared together:
//!
//! | Cookie | Content |
//! |--------|---------|
//! | `role` | `PATIENT`, `DOCTOR` or `ADMIN` (read by the route guard) |
//! | `token` | Backend bearer token |
//! | `user_id` | Backend user id, used to address the user's own records |
//!
//! Handlers receive the session explicitly through the [`CurrentSession`]
//! extractor and pass it down to the action layer.
//!
//! ```rust,ignore
//! async fn my_appointments(
//!     CurrentSession(session): CurrentSession,
//!     State(state): State<AppState>,
//! ) -> Result<Json<Vec<Appointment>>, ApiError> {
//!     // session.user_id, session.token
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{AuthError, Role};

pub const ROLE_COOKIE: &str = "role";
pub const TOKEN_COOKIE: &str = "token";
pub const USER_ID_COOKIE: &str = "user_id";

/// An authenticated user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            token: token.into(),
        }
    }

    /// Read the session from request cookies.
    ///
    /// Returns `Ok(None)` when no session cookie is present and an error when
    /// only some of them are, or when the role is not recognized.
    pub fn from_jar(jar: &CookieJar) -> Result<Option<Self>, AuthError> {
        let value = |name: &str| {
            jar.get(name)
                .map(|c| c.value().trim().to_string())
                .filter(|v| !v.is_empty())
        };

        match (value(ROLE_COOKIE), value(TOKEN_COOKIE), value(USER_ID_COOKIE)) {
            (None, None, None) => Ok(None),
            (Some(role), Some(token), Some(user_id)) => {
                let role = Role::from_claim(&role).ok_or(AuthError::InvalidRole)?;
                Ok(Some(Self::new(user_id, role, token)))
            }
            _ => Err(AuthError::IncompleteSession),
        }
    }
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Write all session cookies.
pub fn establish(jar: CookieJar, session: &Session, secure: bool) -> CookieJar {
    jar.add(session_cookie(ROLE_COOKIE, session.role.to_string(), secure))
        .add(session_cookie(TOKEN_COOKIE, session.token.clone(), secure))
        .add(session_cookie(USER_ID_COOKIE, session.user_id.clone(), secure))
}

/// Clear all session cookies.
pub fn teardown(jar: CookieJar) -> CookieJar {
    [ROLE_COOKIE, TOKEN_COOKIE, USER_ID_COOKIE]
        .into_iter()
        .fold(jar, |jar, name| jar.remove(Cookie::build(name).path("/")))
}

/// Extractor for the current session.
///
/// Rejects with 401 when the request carries no session or an incomplete one.
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Session::from_jar(&jar)?
            .map(CurrentSession)
            .ok_or(AuthError::MissingSession)
    }
}
