// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use super::retry::RetryError;

/// Failure of the backend client itself, before any backend response is
/// interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid backend base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Request(#[from] RetryError<reqwest::Error>),
}

impl ClientError {
    /// Whether the backend could not be reached or kept failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ClientError::Request(_))
    }
}
