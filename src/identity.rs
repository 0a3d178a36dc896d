// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request identity extraction.
//!
//! Two identities are read from each request: the client identity keying
//! admission state, and the principal set by the upstream auth proxy.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, warn};

/// Shared bucket for clients with no usable address.
pub const FALLBACK_IDENTITY: &str = "unknown";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Derive the admission identity for a request.
///
/// Uses the first `X-Forwarded-For` entry when forwarded headers are
/// trusted, then the peer address, then [`FALLBACK_IDENTITY`].
pub fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(ip) = forwarded_ip(headers) {
            return ip.to_string();
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => {
            warn!("No client address available, using shared fallback identity");
            FALLBACK_IDENTITY.to_string()
        }
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let raw = headers.get(FORWARDED_FOR)?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();

    match first.parse() {
        Ok(ip) => Some(ip),
        Err(_) => {
            debug!(value = %first, "Ignoring unparseable X-Forwarded-For entry");
            None
        }
    }
}

/// The authenticated actor behind a request, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Principal {
    email: Option<String>,
    authenticated: bool,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            authenticated: true,
        }
    }

    /// Read the principal from the header the auth proxy sets.
    pub fn from_headers(headers: &HeaderMap, header_name: &str) -> Self {
        headers
            .get(header_name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Principal::authenticated)
            .unwrap_or_default()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
