// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::client::{BackendClient, ClientError};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    /// Mark session cookies `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(backend: BackendClient, cookie_secure: bool) -> Self {
        Self {
            backend: Arc::new(backend),
            cookie_secure,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let backend = BackendClient::new(&config.api_base_url, config.retry)?;
        Ok(Self::new(backend, config.cookie_secure))
    }
}
