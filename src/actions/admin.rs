// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use super::{bearer, read_json, ActionResult};
use crate::auth::Session;
use crate::client::{ApiRequest, BackendClient};
use crate::dashboard::unique_patients;
use crate::models::{Appointment, Patient};

/// Every appointment at the admin's hospital.
pub async fn all_appointments(
    client: &BackendClient,
    session: &Session,
) -> ActionResult<Vec<Appointment>> {
    let request = ApiRequest::get(["admin"]).bearer(bearer(session)?);
    read_json(client.send(request).await?, "Failed to fetch patients").await
}

/// Patients with at least one appointment at the admin's hospital.
pub async fn hospital_patients(
    client: &BackendClient,
    session: &Session,
) -> ActionResult<Vec<Patient>> {
    let request = ApiRequest::get(["admin"]).bearer(bearer(session)?);
    let appointments: Vec<Appointment> =
        read_json(client.send(request).await?, "Failed to fetch Patients").await?;
    Ok(unique_patients(&appointments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionError;
    use crate::test_support::{admin_session, fast_client, spawn_backend};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn admin_backend() -> Router {
        Router::new().route(
            "/api/v1/admin",
            get(|| async {
                Json(json!([
                    { "id": "a-1", "status": "PENDING", "patient": { "id": "p-1", "user": { "firstName": "Rudo" } } },
                    { "id": "a-2", "status": "CONFIRMED", "patient": { "id": "p-2", "user": { "firstName": "Tendai" } } },
                    { "id": "a-3", "status": "COMPLETED", "patient": { "id": "p-1", "user": { "firstName": "Rudo" } } }
                ]))
            }),
        )
    }

    #[tokio::test]
    async fn all_appointments_returns_list() {
        let client = fast_client(&spawn_backend(admin_backend()).await);
        let appointments = all_appointments(&client, &admin_session()).await.unwrap();
        assert_eq!(appointments.len(), 3);
    }

    #[tokio::test]
    async fn hospital_patients_are_deduplicated() {
        let client = fast_client(&spawn_backend(admin_backend()).await);
        let patients = hospital_patients(&client, &admin_session()).await.unwrap();
        let names: Vec<_> = patients.iter().map(|p| p.user.first_name.as_str()).collect();
        assert_eq!(names, vec!["Rudo", "Tendai"]);
    }

    #[tokio::test]
    async fn forbidden_uses_fallback_message() {
        let app = Router::new().route("/api/v1/admin", get(|| async { StatusCode::FORBIDDEN }));
        let client = fast_client(&spawn_backend(app).await);

        match all_appointments(&client, &admin_session()).await.unwrap_err() {
            ActionError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, "Failed to fetch patients");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
