// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::Request,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{route_guard, Role},
    dashboard::AppointmentSummary,
    error::ErrorBody,
    models::{
        Address, Appointment, AppointmentDoctor, AppointmentStatus, AuthUser, BackendMessage,
        BookAppointmentRequest, BookingConfirmation, CreateDoctorRequest, Doctor, DoctorAddress,
        Gender, Hospital, LoginRequest, Patient, RegisterPatientRequest, Slot,
        UpdateDoctorRequest, UpdateStatusRequest, UserProfile,
    },
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod doctors;
pub mod health;
pub mod patients;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/unauthorized", get(auth::unauthorized));

    let admin_routes = Router::new()
        .route("/admin", get(admin::index))
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/appointments/{appointment_id}/status",
            put(admin::update_appointment_status),
        )
        .route("/admin/patients", get(admin::list_patients))
        .route(
            "/admin/doctors",
            get(admin::list_doctors).post(admin::create_doctor),
        )
        .route(
            "/admin/doctors/{doctor_id}",
            put(admin::update_doctor).delete(admin::delete_doctor),
        );

    let doctor_routes = Router::new().route("/doctors", get(doctors::dashboard));

    let patient_routes = Router::new()
        .route("/patients", get(patients::home))
        .route("/patients/appointments", get(patients::my_appointments))
        .route(
            "/patients/appointments/{appointment_id}/cancel",
            post(patients::cancel_appointment),
        )
        .route("/patients/doctors", get(patients::list_doctors))
        .route("/patients/doctors/{doctor_id}", get(patients::get_doctor))
        .route(
            "/patients/doctors/{doctor_id}/slots",
            get(patients::doctor_slots),
        )
        .route(
            "/patients/doctors/{doctor_id}/appointments",
            post(patients::book_appointment),
        );

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(doctor_routes)
        .merge(patient_routes)
        .with_state(state)
        .layer(middleware::from_fn(route_guard))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        auth::login,
        auth::register,
        auth::logout,
        auth::unauthorized,
        admin::index,
        admin::dashboard,
        admin::update_appointment_status,
        admin::list_patients,
        admin::list_doctors,
        admin::create_doctor,
        admin::update_doctor,
        admin::delete_doctor,
        doctors::dashboard,
        patients::home,
        patients::my_appointments,
        patients::cancel_appointment,
        patients::list_doctors,
        patients::get_doctor,
        patients::doctor_slots,
        patients::book_appointment
    ),
    components(
        schemas(
            Role,
            Gender,
            Address,
            UserProfile,
            AuthUser,
            Hospital,
            Doctor,
            Patient,
            AppointmentDoctor,
            Appointment,
            AppointmentStatus,
            AppointmentSummary,
            Slot,
            LoginRequest,
            RegisterPatientRequest,
            CreateDoctorRequest,
            DoctorAddress,
            UpdateDoctorRequest,
            BookAppointmentRequest,
            BookingConfirmation,
            UpdateStatusRequest,
            BackendMessage,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Auth", description = "Login, registration and logout"),
        (name = "Admin", description = "Hospital administration dashboard"),
        (name = "Doctors", description = "Doctor dashboard"),
        (name = "Patients", description = "Patient dashboard and booking")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BackendClient, RetryPolicy};
    use crate::test_support::{spawn_backend, CallLog};
    use axum::{
        body::{to_bytes, Body},
        extract::{Path, State},
        http::{header, HeaderMap, Request, StatusCode},
        response::Response,
        routing::{get, post, put},
        Json,
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    const ADMIN_COOKIES: &str = "role=ADMIN; token=admin-token; user_id=admin-1";
    const PATIENT_COOKIES: &str = "role=PATIENT; token=patient-token; user_id=p-1";
    const DOCTOR_COOKIES: &str = "role=DOCTOR; token=doctor-token; user_id=d-1";

    fn appointments_json() -> Value {
        json!([
            {
                "id": "a-1", "status": "CANCELLED", "startTime": "2026-03-14T08:00:00Z",
                "patient": { "id": "p-1", "user": { "firstName": "Rudo", "lastName": "Moyo" } },
                "doctor": { "user": { "firstName": "Farai", "lastName": "Ncube" } }
            },
            {
                "id": "a-2", "status": "CONFIRMED", "startTime": "2026-03-15T08:00:00Z",
                "patient": { "id": "p-2", "user": { "firstName": "Tendai", "lastName": "Sibanda" } },
                "doctor": { "user": { "firstName": "Nyasha", "lastName": "Dube" } }
            },
            {
                "id": "a-3", "status": "PENDING", "startTime": "2026-03-16T08:00:00Z",
                "patient": { "id": "p-1", "user": { "firstName": "Rudo", "lastName": "Moyo" } },
                "doctor": { "user": { "firstName": "Nyasha", "lastName": "Dube" } }
            }
        ])
    }

    fn backend(log: CallLog) -> Router {
        Router::new()
            .route(
                "/api/v1/admin/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "wrong-password" {
                        return (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "message": "Invalid credentials" })),
                        );
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "message": "Login successful",
                            "user": { "id": "admin-1", "role": "ADMIN", "firstName": "Ada" },
                            "accessToken": "admin-token"
                        })),
                    )
                }),
            )
            .route(
                "/api/v1/admin",
                get(|headers: HeaderMap| async move {
                    assert_eq!(headers["authorization"], "Bearer admin-token");
                    Json(appointments_json())
                }),
            )
            .route(
                "/api/v1/appointment/my-appointments/{user_id}",
                get(|| async { Json(appointments_json()) }),
            )
            .route(
                "/api/v1/doctor/appointments/{doctor_id}",
                get(|Path(doctor_id): Path<String>| async move {
                    assert_eq!(doctor_id, "d-1");
                    Json(json!({ "appointments": appointments_json() }))
                }),
            )
            .route(
                "/api/v1/appointment/book",
                post(|| async {
                    (
                        StatusCode::CONFLICT,
                        Json(json!({ "message": "Slot already taken" })),
                    )
                }),
            )
            .route(
                "/api/v1/appointment/update/{id}",
                put(|State(log): State<CallLog>, Path(id): Path<String>| async move {
                    log.record(&format!("update:{id}"));
                    Json(json!({ "message": "updated" }))
                }),
            )
            .route(
                "/api/v1/doctor",
                get(|State(log): State<CallLog>| async move {
                    log.record("doctor");
                    StatusCode::SERVICE_UNAVAILABLE
                }),
            )
            .with_state(log)
    }

    async fn app() -> (Router, CallLog) {
        let log = CallLog::default();
        let base = spawn_backend(backend(log.clone())).await;
        let client = BackendClient::new(&base, RetryPolicy::new(3, Duration::from_millis(5))).unwrap();
        (router(AppState::new(client, false)), log)
    }

    async fn send(app: Router, method: &str, uri: &str, cookies: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookies) = cookies {
            builder = builder.header(header::COOKIE, cookies);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        app.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_is_public_and_tagged_with_request_id() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/api-doc/openapi.json", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"]["/patients/doctors/{doctor_id}/appointments"].is_object());
    }

    #[tokio::test]
    async fn guard_redirects_anonymous_and_wrong_role() {
        let (app, _) = app().await;

        let response = send(app.clone(), "GET", "/admin/dashboard", None, None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/login");

        let response = send(app.clone(), "GET", "/patients", Some(ADMIN_COOKIES), None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/unauthorized");

        let response = send(app, "GET", "/doctors", Some("role=pharmacist"), None).await;
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn login_sets_session_cookies() {
        let (app, _) = app().await;
        let response = send(
            app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "admin@pulse.org", "password": "secret1" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("role=ADMIN")));
        assert!(cookies.iter().any(|c| c.starts_with("token=admin-token")));
        assert!(cookies.iter().any(|c| c.starts_with("user_id=admin-1")));

        let body = json_body(response).await;
        assert_eq!(body["redirect"], "/admin");
        assert_eq!(body["user"]["role"], "ADMIN");
    }

    #[tokio::test]
    async fn failed_login_sets_no_cookies() {
        let (app, _) = app().await;
        let response = send(
            app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "admin@pulse.org", "password": "wrong-password" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&response).is_empty());
        assert_eq!(json_body(response).await["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn invalid_login_form_is_422() {
        let (app, _) = app().await;
        let response = send(
            app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "not-an-email", "password": "secret1" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "Invalid email address");
    }

    #[tokio::test]
    async fn logout_clears_cookies_and_redirects() {
        let (app, _) = app().await;
        let response = send(app, "POST", "/logout", Some(ADMIN_COOKIES), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 3);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn unauthorized_page_is_403() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/unauthorized", None, None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_index_redirects_to_dashboard() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/admin", Some(ADMIN_COOKIES), None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/admin/dashboard");
    }

    #[tokio::test]
    async fn admin_dashboard_summarizes_and_filters() {
        let (app, _) = app().await;
        let response = send(
            app,
            "GET",
            "/admin/dashboard?q=nyasha&status=PENDING",
            Some(ADMIN_COOKIES),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["summary"]["cancelled"], 1);
        assert_eq!(body["summary"]["confirmed"], 1);
        assert_eq!(body["summary"]["pending"], 1);
        let appointments = body["appointments"].as_array().unwrap();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0]["id"], "a-3");
    }

    #[tokio::test]
    async fn admin_patients_are_unique() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/admin/patients", Some(ADMIN_COOKIES), None).await;
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn admin_updates_appointment_status() {
        let (app, log) = app().await;
        let response = send(
            app,
            "PUT",
            "/admin/appointments/a-2/status",
            Some(ADMIN_COOKIES),
            Some(json!({ "newStatus": "COMPLETED" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "COMPLETED");
        assert_eq!(log.count("update:a-2"), 1);
    }

    #[tokio::test]
    async fn doctor_dashboard_sorts_by_priority() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/doctors", Some(DOCTOR_COOKIES), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let ids: Vec<_> = body["appointments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["a-2", "a-3", "a-1"]);
    }

    #[tokio::test]
    async fn patient_home_lists_sorted_appointments() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/patients", Some(PATIENT_COOKIES), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["appointments"][0]["status"], "CONFIRMED");
        assert_eq!(body["appointments"][2]["status"], "CANCELLED");
    }

    #[tokio::test]
    async fn role_cookie_alone_is_an_incomplete_session() {
        let (app, _) = app().await;
        let response = send(app, "GET", "/patients", Some("role=PATIENT"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error_code"], "incomplete_session");
    }

    #[tokio::test]
    async fn patient_cancels_appointment() {
        let (app, log) = app().await;
        let response = send(
            app,
            "POST",
            "/patients/appointments/a-3/cancel",
            Some(PATIENT_COOKIES),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "CANCELLED");
        assert_eq!(log.count("update:a-3"), 1);
    }

    #[tokio::test]
    async fn booking_conflict_keeps_backend_status() {
        let (app, _) = app().await;
        let response = send(
            app,
            "POST",
            "/patients/doctors/d-1/appointments",
            Some(PATIENT_COOKIES),
            Some(json!({ "date": "2026-03-14", "startTime": "09:00" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["error"], "Slot already taken");
    }

    #[tokio::test]
    async fn unavailable_backend_is_502_after_retries() {
        let (app, log) = app().await;
        let response = send(app, "GET", "/patients/doctors", Some(PATIENT_COOKIES), None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(log.count("doctor"), 3);
    }
}
