// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Dashboards
///
/// - `Patient` - Books and cancels own appointments (`/patients`)
/// - `Doctor` - Reviews own appointments (`/doctors`)
/// - `Admin` - Manages hospital doctors and appointments (`/admin`)
///
/// Roles are disjoint: an admin cannot open the patient dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    /// Parse a role claim as stored in the `role` cookie.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    /// Returns `None` for empty or unknown values.
    pub fn from_claim(raw: &str) -> Option<Role> {
        match raw.trim().to_uppercase().as_str() {
            "PATIENT" => Some(Role::Patient),
            "DOCTOR" => Some(Role::Doctor),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Wire form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Doctor => "DOCTOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Dashboard a user lands on after login.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patients",
            Role::Doctor => "/doctors",
            Role::Admin => "/admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_claim_normalizes_case_and_whitespace() {
        assert_eq!(Role::from_claim("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim(" admin "), Some(Role::Admin));
        assert_eq!(Role::from_claim("Doctor"), Some(Role::Doctor));
        assert_eq!(Role::from_claim("patient\n"), Some(Role::Patient));
    }

    #[test]
    fn from_claim_rejects_empty_and_unknown() {
        assert_eq!(Role::from_claim(""), None);
        assert_eq!(Role::from_claim("   "), None);
        assert_eq!(Role::from_claim("NURSE"), None);
        assert_eq!(Role::from_claim("\"ADMIN\""), None);
    }

    #[test]
    fn serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"DOCTOR\"");
        let role: Role = serde_json::from_str("\"PATIENT\"").unwrap();
        assert_eq!(role, Role::Patient);
    }

    #[test]
    fn home_paths() {
        assert_eq!(Role::Admin.home_path(), "/admin");
        assert_eq!(Role::Doctor.home_path(), "/doctors");
        assert_eq!(Role::Patient.home_path(), "/patients");
    }
}
