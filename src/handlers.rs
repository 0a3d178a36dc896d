// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the RSVP gate service.
//!
//! The public submission route passes the admission limiter before anything
//! else; every admin route sits behind [`require_admin`], which rejects
//! before any RSVP lookup so a denied caller learns nothing about which
//! records exist.

use crate::authz::AuthorizationGate;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::identity::{client_identity, Principal};
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::metrics::Metrics;
use crate::rsvp::{Rsvp, RsvpStats, RsvpSubmission, RsvpUpdate, ValidationError};
use crate::store::RsvpStore;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub gate: AuthorizationGate,
    pub store: RsvpStore,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    /// Build state from configuration with an empty store.
    pub fn new(config: Config) -> prometheus::Result<Self> {
        Ok(Self {
            limiter: RateLimiter::new(config.rate_limit.clone()),
            gate: AuthorizationGate::new(config.admin.rule.clone()),
            store: RsvpStore::new(),
            metrics: Metrics::new()?,
            config,
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub rsvp: Rsvp,
}

#[derive(Debug, Serialize)]
pub struct RsvpResponse {
    pub rsvp: Rsvp,
}

#[derive(Debug, Serialize)]
pub struct RsvpListResponse {
    pub rsvps: Vec<Rsvp>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/rsvps", get(list_rsvps).post(create_rsvp))
        .route("/rsvps/stats", get(rsvp_stats))
        .route("/rsvps/:id", put(update_rsvp).delete(delete_rsvp))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/api/rsvp", post(submit_rsvp))
        .nest("/api/admin", admin);

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(metrics));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "rsvp-gate",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<String> {
    state
        .metrics
        .render()
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Public RSVP submission.
///
/// Admission runs first; the body is only parsed for admitted requests.
pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitResponse>> {
    let identity = client_identity(
        &headers,
        connect_info.map(|ConnectInfo(addr)| addr),
        state.config.identity.trust_forwarded_for,
    );

    let decision = state.limiter.check(&identity).await;
    state.metrics.record_admission(decision.is_allowed());

    if let RateLimitResult::Limited { retry_after } = decision {
        info!(
            identity = %identity,
            retry_after_secs = retry_after.as_secs(),
            "RSVP submission rate limited"
        );
        return Err(AppError::RateLimited { retry_after });
    }

    let new = parse_submission(&body)?.validate()?;
    let rsvp = state.store.upsert(new).await;
    state.metrics.record_write("submit");

    info!(identity = %identity, rsvp_id = %rsvp.id, attending = rsvp.attending, "RSVP submitted");
    Ok(Json(SubmitResponse { success: true, rsvp }))
}

fn parse_submission(body: &[u8]) -> Result<RsvpSubmission> {
    serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()).into())
}

/// Reject callers that are not admins before the handler runs.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let principal = Principal::from_headers(&headers, &state.config.identity.principal_header);
    let level = state.gate.access_level(&principal);
    state.metrics.record_authorization(level.is_admin());

    if !level.is_admin() {
        info!(
            email = ?principal.email(),
            level = ?level,
            path = %request.uri().path(),
            "Admin access denied"
        );
        return AppError::Unauthorized.into_response();
    }

    debug!(email = ?principal.email(), path = %request.uri().path(), "Admin access granted");
    next.run(request).await
}

pub async fn list_rsvps(State(state): State<Arc<AppState>>) -> Json<RsvpListResponse> {
    Json(RsvpListResponse {
        rsvps: state.store.list().await,
    })
}

pub async fn rsvp_stats(State(state): State<Arc<AppState>>) -> Json<RsvpStats> {
    Json(state.store.stats().await)
}

pub async fn create_rsvp(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RsvpResponse>)> {
    let new = parse_submission(&body)?.validate()?;
    let rsvp = state.store.upsert(new).await;
    state.metrics.record_write("admin_create");

    Ok((StatusCode::CREATED, Json(RsvpResponse { rsvp })))
}

pub async fn update_rsvp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<RsvpResponse>> {
    let update: RsvpUpdate = serde_json::from_slice(&body)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
    let rsvp = state.store.update(id, update.validate()?).await?;
    state.metrics.record_write("admin_update");

    Ok(Json(RsvpResponse { rsvp }))
}

pub async fn delete_rsvp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    state.store.delete(id).await?;
    state.metrics.record_write("admin_delete");

    Ok(Json(SuccessResponse { success: true }))
}
