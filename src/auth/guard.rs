// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role-based route guard.
//!
//! Runs ahead of every handler and decides, from the `role` cookie alone,
//! whether a navigation into a protected dashboard may proceed.
//!
//! ## Decision Table
//!
//! | Path | Role claim | Outcome |
//! |------|------------|---------|
//! | outside the protected subtrees | any | allow |
//! | protected | missing, empty or unknown | redirect `/login` |
//! | `/admin/**` | not `ADMIN` | redirect `/unauthorized` |
//! | `/doctors/**` | not `DOCTOR` | redirect `/unauthorized` |
//! | `/patients/**` | not `PATIENT` | redirect `/unauthorized` |
//! | protected | matching role | allow |
//!
//! The guard never validates the bearer token; the backend does that on
//! every call.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use super::{session::ROLE_COOKIE, Role};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Protected subtrees and the role each one requires.
const PROTECTED: [(&str, Role); 3] = [
    ("/admin", Role::Admin),
    ("/doctors", Role::Doctor),
    ("/patients", Role::Patient),
];

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
}

impl GuardDecision {
    /// Redirect target, if the navigation is blocked.
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
        }
    }
}

/// Role required to enter `path`, or `None` if the path is not protected.
///
/// Matching is per path segment: `/admin` and `/admin/doctors` are protected,
/// `/administrator` is not.
pub fn required_role(path: &str) -> Option<Role> {
    PROTECTED.iter().find_map(|(prefix, role)| {
        let rest = path.strip_prefix(prefix)?;
        (rest.is_empty() || rest.starts_with('/')).then_some(*role)
    })
}

/// Decide whether a navigation to `path` with `role_claim` may proceed.
pub fn evaluate(path: &str, role_claim: Option<&str>) -> GuardDecision {
    let Some(required) = required_role(path) else {
        return GuardDecision::Allow;
    };

    match role_claim.and_then(Role::from_claim) {
        None => GuardDecision::RedirectToLogin,
        Some(role) if role == required => GuardDecision::Allow,
        Some(_) => GuardDecision::RedirectToUnauthorized,
    }
}

/// Route guard middleware.
///
/// Use with `axum::middleware::from_fn(route_guard)`.
pub async fn route_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let claim = jar.get(ROLE_COOKIE).map(|c| c.value());
    let decision = evaluate(request.uri().path(), claim);

    match decision.location() {
        None => next.run(request).await,
        Some(location) => {
            debug!(path = %request.uri().path(), location, "Route guard redirected navigation");
            Redirect::temporary(location).into_response()
        }
    }
}
