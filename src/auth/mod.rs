// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Cookie sessions and role-based navigation control for the dashboards.
//!
//! ## Flow
//!
//! 1. `POST /login` forwards credentials to the backend
//! 2. On success the backend token, user id and role are written as cookies
//! 3. The route guard checks the `role` cookie on every navigation into
//!    `/admin`, `/doctors` or `/patients`
//! 4. Handlers read the full session with the `CurrentSession` extractor and
//!    forward the token to the backend
//!
//! ## Security
//!
//! - The guard trusts the role cookie for navigation only
//! - The backend validates the bearer token on every call
//! - Session cookies are HttpOnly and SameSite=Lax

pub mod error;
pub mod guard;
pub mod roles;
pub mod session;

pub use error::AuthError;
pub use guard::{route_guard, GuardDecision};
pub use roles::Role;
pub use session::{CurrentSession, Session};
