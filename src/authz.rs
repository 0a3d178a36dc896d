// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Authorization gate for admin-only RSVP operations.
//!
//! The gate is a pure predicate over a static [`AdminRule`] and the
//! principal's email. Authentication itself happens upstream; this module
//! only reads the resulting principal.

use crate::config::ConfigError;
use crate::identity::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Rule deciding which identifiers are admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum AdminRule {
    /// Exact, case-sensitive identifiers
    AllowList(BTreeSet<String>),
    /// Identifiers ending in this suffix on an `@`/`.` boundary
    DomainSuffix(String),
}

impl AdminRule {
    /// Build an allow-list, dropping blank entries.
    pub fn allow_list<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list: BTreeSet<String> = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if list.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        Ok(AdminRule::AllowList(list))
    }

    /// Build a domain-suffix rule such as `@example.com` or `example.com`.
    pub fn domain_suffix(suffix: impl AsRef<str>) -> Result<Self, ConfigError> {
        let suffix = suffix.as_ref().trim();
        if suffix.is_empty() || suffix == "@" || suffix == "." {
            return Err(ConfigError::EmptyDomainSuffix);
        }
        Ok(AdminRule::DomainSuffix(suffix.to_string()))
    }

    /// Whether a present, non-empty identifier satisfies the rule.
    pub fn matches(&self, identifier: &str) -> bool {
        match self {
            AdminRule::AllowList(list) => list.contains(identifier),
            AdminRule::DomainSuffix(suffix) => suffix_matches(identifier, suffix),
        }
    }
}

/// Suffix match that refuses partial-label hits.
///
/// `eve@notexample.com` does not end in `example.com` on a boundary, so it
/// does not match. A suffix that already begins with `@` or `.` carries its
/// own boundary.
fn suffix_matches(identifier: &str, suffix: &str) -> bool {
    let Some(head) = identifier.strip_suffix(suffix) else {
        return false;
    };

    if suffix.starts_with('@') || suffix.starts_with('.') {
        return true;
    }

    head.is_empty() || head.ends_with('@') || head.ends_with('.')
}

/// Conceptual access state of a request's principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Unauthenticated,
    AuthenticatedNonAdmin,
    AuthenticatedAdmin,
}

impl AccessLevel {
    pub fn is_admin(self) -> bool {
        matches!(self, AccessLevel::AuthenticatedAdmin)
    }
}

/// Admin authorization gate.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    rule: AdminRule,
}

impl AuthorizationGate {
    pub fn new(rule: AdminRule) -> Self {
        Self { rule }
    }

    /// True iff the identifier is present, non-empty and matches the rule.
    pub fn is_authorized(&self, identifier: Option<&str>) -> bool {
        match identifier {
            Some(id) if !id.is_empty() => self.rule.matches(id),
            _ => false,
        }
    }

    /// Classify a principal.
    pub fn access_level(&self, principal: &Principal) -> AccessLevel {
        if !principal.is_authenticated() {
            return AccessLevel::Unauthenticated;
        }

        if self.is_authorized(principal.email()) {
            AccessLevel::AuthenticatedAdmin
        } else {
            debug!(email = ?principal.email(), "Authenticated principal is not an admin");
            AccessLevel::AuthenticatedNonAdmin
        }
    }
}
