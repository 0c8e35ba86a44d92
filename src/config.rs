// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `API_BASE_URL` | Base URL of the PulseConnect backend API | `https://pulseconnect-backend.onrender.com/api/v1` |
//! | `HOST` | Server bind IP address (IPv4 or IPv6) | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `API_MAX_RETRIES` | Total attempts per backend call | `3` |
//! | `API_INITIAL_DELAY_MS` | Backoff delay after the first failed attempt | `1000` |
//! | `API_RETRY_JITTER` | Fraction of each delay added as random jitter | `0` |
//! | `COOKIE_SECURE` | Mark session cookies `Secure` | `false` |
//! | `TLS_CERT_PATH` | PEM certificate chain (enables HTTPS with `TLS_KEY_PATH`) | unset |
//! | `TLS_KEY_PATH` | PEM private key | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use crate::client::retry::{RetryPolicy, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_RETRIES};

/// Environment variable name for the backend API base URL.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Backend used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://pulseconnect-backend.onrender.com/api/v1";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable name for the total number of attempts per backend call.
pub const API_MAX_RETRIES_ENV: &str = "API_MAX_RETRIES";

/// Environment variable name for the first backoff delay, in milliseconds.
pub const API_INITIAL_DELAY_MS_ENV: &str = "API_INITIAL_DELAY_MS";

/// Environment variable name for the retry jitter ratio.
///
/// `0` (the default) keeps the backoff schedule exact.
pub const API_RETRY_JITTER_ENV: &str = "API_RETRY_JITTER";

pub const COOKIE_SECURE_ENV: &str = "COOKIE_SECURE";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

/// Environment variable selecting `json` or `pretty` log output.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration error raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Paths to the PEM files served over HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub retry: RetryPolicy,
    pub cookie_secure: bool,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_base_url = var(API_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        url::Url::parse(&api_base_url).map_err(|e| ConfigError::InvalidValue {
            name: API_BASE_URL_ENV,
            value: api_base_url.clone(),
            reason: e.to_string(),
        })?;

        let host: IpAddr = parse_or(&lookup, HOST_ENV, DEFAULT_HOST)?;
        let port: u16 = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let bind_addr = SocketAddr::new(host, port);

        let max_retries: u32 = parse_or(&lookup, API_MAX_RETRIES_ENV, DEFAULT_MAX_RETRIES)?;
        let initial_delay_ms: u64 = parse_or(
            &lookup,
            API_INITIAL_DELAY_MS_ENV,
            DEFAULT_INITIAL_DELAY.as_millis() as u64,
        )?;
        let jitter: f64 = parse_or(&lookup, API_RETRY_JITTER_ENV, 0.0)?;
        if !(0.0..=1.0).contains(&jitter) {
            return Err(ConfigError::InvalidValue {
                name: API_RETRY_JITTER_ENV,
                value: jitter.to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }

        let retry = RetryPolicy::new(max_retries, Duration::from_millis(initial_delay_ms))
            .with_jitter(jitter);

        let cookie_secure = parse_or(&lookup, COOKIE_SECURE_ENV, false)?;

        let tls = match (var(TLS_CERT_PATH_ENV), var(TLS_KEY_PATH_ENV)) {
            (Some(cert_path), Some(key_path)) => Some(TlsPaths {
                cert_path,
                key_path,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete(TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV)),
        };

        let log_format = match var(LOG_FORMAT_ENV).as_deref().map(str::to_ascii_lowercase) {
            Some(ref f) if f == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            api_base_url,
            bind_addr,
            retry,
            cookie_secure,
            tls,
            log_format,
        })
    }
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            value,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
