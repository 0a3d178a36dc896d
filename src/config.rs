// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the RSVP gate service.
//!
//! Defaults match the party site's deployment: ten submissions per client
//! per fifteen minutes, admins identified by the organisation's email domain.

use crate::authz::AdminRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Longest accepted admission window (one year).
pub const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Admin allow-list is empty")]
    EmptyAllowList,

    #[error("Admin domain suffix is empty")]
    EmptyDomainSuffix,
}

/// Configuration for the RSVP gate service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Admission limiting for the public submission route
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Admin authorization rule
    #[serde(default)]
    pub admin: AdminConfig,

    /// Client and principal identity extraction
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Fixed-window admission limiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per window per client (default: 10)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds (default: 900)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

/// Admin authorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_rule")]
    pub rule: AdminRule,
}

/// How client identities and principals are read from requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Trust the first `X-Forwarded-For` entry (default: true)
    #[serde(default = "default_true")]
    pub trust_forwarded_for: bool,

    /// Header carrying the authenticated email set by the auth proxy
    #[serde(default = "default_principal_header")]
    pub principal_header: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    15 * 60
}

fn default_admin_rule() -> AdminRule {
    AdminRule::DomainSuffix("@dynamicendpoints.com".to_string())
}

fn default_principal_header() -> String {
    "x-auth-request-email".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            admin: AdminConfig::default(),
            identity: IdentityConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            rule: default_admin_rule(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            trust_forwarded_for: default_true(),
            principal_header: default_principal_header(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the window duration, capped at [`MAX_WINDOW_SECS`]
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs.min(MAX_WINDOW_SECS))
    }
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// - `BIND_ADDR`: server bind address
    /// - `RATE_LIMIT_MAX_REQUESTS`: submissions allowed per window
    /// - `RATE_LIMIT_WINDOW_SECS`: window length in seconds
    /// - `TRUST_FORWARDED_FOR`: `true`/`false`
    /// - `PRINCIPAL_HEADER`: header carrying the authenticated email
    /// - `ADMIN_EMAILS`: comma-separated allow-list (takes precedence)
    /// - `ADMIN_EMAIL_DOMAIN`: admin email suffix, e.g. `@example.com`
    /// - `METRICS_ENABLED`: `true`/`false`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let window_secs: Option<u64> = parse_var(&lookup, "RATE_LIMIT_WINDOW_SECS")?;
        if let Some(secs) = window_secs.filter(|secs| *secs > MAX_WINDOW_SECS) {
            return Err(ConfigError::InvalidValue {
                var: "RATE_LIMIT_WINDOW_SECS",
                value: secs.to_string(),
            });
        }

        let admin_rule = match (lookup("ADMIN_EMAILS"), lookup("ADMIN_EMAIL_DOMAIN")) {
            (Some(list), _) => AdminRule::allow_list(list.split(','))?,
            (None, Some(suffix)) => AdminRule::domain_suffix(suffix)?,
            (None, None) => defaults.admin.rule,
        };

        Ok(Config {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit: RateLimitConfig {
                max_requests: parse_var(&lookup, "RATE_LIMIT_MAX_REQUESTS")?
                    .unwrap_or(defaults.rate_limit.max_requests),
                window_secs: window_secs.unwrap_or(defaults.rate_limit.window_secs),
            },
            admin: AdminConfig { rule: admin_rule },
            identity: IdentityConfig {
                trust_forwarded_for: parse_var(&lookup, "TRUST_FORWARDED_FOR")?
                    .unwrap_or(defaults.identity.trust_forwarded_for),
                principal_header: lookup("PRINCIPAL_HEADER")
                    .map(|h| h.trim().to_ascii_lowercase())
                    .filter(|h| !h.is_empty())
                    .unwrap_or(defaults.identity.principal_header),
            },
            metrics: MetricsConfig {
                enabled: parse_var(&lookup, "METRICS_ENABLED")?
                    .unwrap_or(defaults.metrics.enabled),
                ..defaults.metrics
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
