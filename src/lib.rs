// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PulseConnect Web - Hospital Appointment Booking Front-End
//!
//! Backend-for-frontend serving the patient, doctor and admin dashboards.
//! Scheduling and authorization rules live in the external PulseConnect API;
//! this service forwards forms to it and shapes its answers for the UI.
//!
//! ## Modules
//!
//! - `api` - HTTP routes (Axum) and OpenAPI docs
//! - `auth` - Cookie sessions and the role-based route guard
//! - `actions` - One function per backend operation
//! - `client` - Retrying HTTP client for the backend
//! - `dashboard` - Summary counts, ordering and filtering

pub mod actions;
pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
