// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared helpers for tests that talk to an in-process mock backend.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::{Role, Session};
use crate::client::{BackendClient, RetryPolicy};

/// Serve `app` on an ephemeral local port and return its `/api/v1` base URL.
pub(crate) async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

/// Client with millisecond backoff so retry tests stay fast.
pub(crate) fn fast_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, RetryPolicy::new(3, Duration::from_millis(5))).unwrap()
}

pub(crate) fn admin_session() -> Session {
    Session::new("admin-1", Role::Admin, "admin-token")
}

pub(crate) fn patient_session() -> Session {
    Session::new("p-1", Role::Patient, "patient-token")
}

pub(crate) fn doctor_session() -> Session {
    Session::new("d-1", Role::Doctor, "doctor-token")
}

/// Per-key hit counter shared between a mock backend and the test body.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<HashMap<String, u32>>>);

impl CallLog {
    /// Record a hit on `key` and return the running count.
    pub(crate) fn record(&self, key: &str) -> u32 {
        let mut calls = self.0.lock().unwrap();
        let count = calls.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub(crate) fn count(&self, key: &str) -> u32 {
        self.0.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}
