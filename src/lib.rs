// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! RSVP Gate
//!
//! HTTP service behind the party site's RSVP form and admin dashboard.
//! Every state-changing request passes one of two gates:
//!
//! - Per-client admission limiting on the public submission route
//!   (10 requests per 15 minutes default)
//! - Admin authorization by email allow-list or domain suffix on the
//!   dashboard routes

pub mod authz;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod limiter;
pub mod metrics;
pub mod rsvp;
pub mod store;

pub use authz::{AccessLevel, AdminRule, AuthorizationGate};
pub use config::Config;
pub use error::AppError;
pub use identity::{Principal, FALLBACK_IDENTITY};
pub use limiter::{RateLimitResult, RateLimiter};
