// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use pulseconnect_web::{
    api::router,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Time in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let state = AppState::from_config(&config)?;
    info!(
        api_base_url = %state.backend.base_url(),
        max_retries = config.retry.max_retries,
        initial_delay_ms = config.retry.initial_delay.as_millis() as u64,
        jitter = config.retry.jitter,
        tls = config.tls.is_some(),
        "Configuration loaded"
    );

    let app = router(state);

    let shutdown = CancellationToken::new();
    let handle = Handle::new();
    {
        let shutdown = shutdown.clone();
        let handle = handle.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!(error = %e, "Failed to listen for Ctrl-C");
                    }
                }
                _ = shutdown.cancelled() => {}
            }
            info!("Shutdown signal received, draining connections");
            shutdown.cancel();
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
        });
    }

    let addr = config.bind_addr;
    match &config.tls {
        Some(tls) => {
            // The ring provider must be installed before any TLS config is built.
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "failed to install rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

            info!(address = %addr, "PulseConnect web listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!(address = %addr, "PulseConnect web listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    shutdown.cancel();
    info!("Shutdown complete");
    Ok(())
}
