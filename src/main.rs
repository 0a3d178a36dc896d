// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! RSVP Gate Service
//!
//! Serves the RSVP submission endpoint and the admin RSVP API.
//!
//! ## Deployment
//!
//! The service expects to sit behind a reverse proxy that:
//!
//! 1. Sets `X-Forwarded-For` to the real client address, which keys the
//!    admission limiter.
//! 2. Authenticates dashboard users and passes their email in
//!    `X-Auth-Request-Email` (configurable), which the admin gate reads.
//!
//! ## Configuration
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_MAX_REQUESTS`: Submissions per window per client (default: 10)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length (default: 900)
//! - `ADMIN_EMAILS`: Comma-separated admin allow-list
//! - `ADMIN_EMAIL_DOMAIN`: Admin email suffix (default: @dynamicendpoints.com)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rsvp_gate::{config::Config, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        admin_rule = ?config.admin.rule,
        trust_forwarded_for = config.identity.trust_forwarded_for,
        "Starting RSVP gate"
    );

    let addr: SocketAddr = config.bind_addr.parse()?;
    let state = Arc::new(handlers::AppState::new(config)?);
    let app = handlers::router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
