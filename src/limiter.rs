// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window admission limiter for the public RSVP endpoint.
//!
//! Each client identity gets one [`RateRecord`]. The first request opens a
//! window; further requests count against it until it expires, at which
//! point the next request replaces the record with a fresh window.
//!
//! State is per process. Separate instances behind a load balancer each
//! keep their own map and do not coordinate.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Result of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// Time until window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window expires
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Admission state for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    pub count: u32,
    pub window_reset_at: Instant,
}

/// Thread-safe admission limiter.
pub struct RateLimiter {
    config: RateLimitConfig,
    records: RwLock<HashMap<String, RateRecord>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Check and count one request for `identity`.
    ///
    /// The read-modify-write happens under the map's write lock, so
    /// concurrent callers for the same identity never both observe a stale
    /// count.
    pub async fn check(&self, identity: &str) -> RateLimitResult {
        let now = Instant::now();
        let window = self.config.window_duration();
        let max = self.config.max_requests;

        let mut records = self.records.write().await;

        if let Some(record) = records.get_mut(identity) {
            if now <= record.window_reset_at {
                if record.count >= max {
                    let retry_after = record.window_reset_at.saturating_duration_since(now);
                    debug!(identity, count = record.count, ?retry_after, "Admission denied");
                    return RateLimitResult::Limited { retry_after };
                }

                record.count += 1;
                return RateLimitResult::Allowed {
                    remaining: max - record.count,
                    reset_in: record.window_reset_at.saturating_duration_since(now),
                };
            }
        }

        if max == 0 {
            debug!(identity, "Admission denied, limit is zero");
            return RateLimitResult::Limited { retry_after: window };
        }

        records.insert(
            identity.to_string(),
            RateRecord {
                count: 1,
                window_reset_at: now + window,
            },
        );
        debug!(identity, "Opened admission window");
        RateLimitResult::Allowed {
            remaining: max - 1,
            reset_in: window,
        }
    }

    /// Current record for an identity, if one exists.
    pub async fn record(&self, identity: &str) -> Option<RateRecord> {
        self.records.read().await.get(identity).copied()
    }

    /// Number of identities with a record.
    pub async fn tracked_identities(&self) -> usize {
        self.records.read().await.len()
    }
}
