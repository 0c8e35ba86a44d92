// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bounded exponential-backoff retry for outbound backend calls.
//!
//! ## Classification
//!
//! - Transport failure (connect error, timeout, broken body): retryable
//! - Response status >= 500 (504 included): retryable
//! - Anything else (2xx, 3xx, 4xx): returned to the caller as-is
//!
//! ## Schedule
//!
//! `max_retries` bounds the total number of attempts. After failed attempt
//! `k` the loop sleeps `initial_delay * 2^(k-1)` before attempt `k + 1`.
//! Jitter is opt-in; with the default of zero the schedule is exact.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;
use tracing::{debug, warn};

/// Default total number of attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay after the first failed attempt.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Anything the retry loop can inspect for an HTTP status.
pub trait HasStatus {
    fn status(&self) -> StatusCode;
}

impl HasStatus for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }
}

/// Whether a response status marks a transient server failure.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::GATEWAY_TIMEOUT
}

/// Final failure of a retried call.
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    #[error("request failed after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: E,
    },

    #[error("server responded with {status} after {attempts} attempt(s)")]
    Server { attempts: u32, status: StatusCode },
}

impl<E> RetryError<E> {
    /// Number of attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Transport { attempts, .. } | RetryError::Server { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Retry schedule for one outbound call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts allowed (0 is treated as 1).
    pub max_retries: u32,
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
    /// Fraction of each delay added as random jitter, in `[0, 1]`.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_INITIAL_DELAY)
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            jitter: 0.0,
        }
    }

    /// Enable proportional jitter (clamped to `[0, 1]`).
    pub fn with_jitter(mut self, ratio: f64) -> Self {
        self.jitter = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Base delay slept after failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.initial_delay.saturating_mul(factor)
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        let base = self.backoff(attempt);
        if self.jitter <= 0.0 {
            return base;
        }
        let jitter_range = (base.as_millis() as f64 * self.jitter) as u64;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..=jitter_range)
        } else {
            0
        };
        base + Duration::from_millis(jitter)
    }

    /// Drive `attempt` until it yields a non-retryable outcome or the
    /// attempt budget runs out.
    ///
    /// `attempt` receives the 1-based attempt number and must build a fresh
    /// request each time it is called.
    pub async fn execute<R, E, F, Fut>(&self, mut attempt: F) -> Result<R, RetryError<E>>
    where
        R: HasStatus,
        E: std::fmt::Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let max_attempts = self.max_attempts();
        let mut current = 0;

        loop {
            current += 1;

            let failure = match attempt(current).await {
                Ok(response) if !is_retryable_status(response.status()) => return Ok(response),
                Ok(response) => RetryError::Server {
                    attempts: current,
                    status: response.status(),
                },
                Err(source) => RetryError::Transport {
                    attempts: current,
                    source,
                },
            };

            if current >= max_attempts {
                warn!(attempts = current, error = %failure, "Backend call failed, giving up");
                return Err(failure);
            }

            let delay = self.delay_after(current);
            debug!(
                attempt = current,
                delay_ms = delay.as_millis() as u64,
                error = %failure,
                "Backend call failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
