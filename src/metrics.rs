// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for gate decisions and RSVP writes.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Service-owned metric registry.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    admissions: IntCounterVec,
    authorizations: IntCounterVec,
    rsvp_writes: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("rsvp_gate".to_string()), None)?;

        let admissions = IntCounterVec::new(
            Opts::new("admissions_total", "Admission limiter decisions"),
            &["outcome"],
        )?;
        let authorizations = IntCounterVec::new(
            Opts::new("authorizations_total", "Admin authorization decisions"),
            &["outcome"],
        )?;
        let rsvp_writes = IntCounterVec::new(
            Opts::new("rsvp_writes_total", "RSVP writes by kind"),
            &["kind"],
        )?;

        registry.register(Box::new(admissions.clone()))?;
        registry.register(Box::new(authorizations.clone()))?;
        registry.register(Box::new(rsvp_writes.clone()))?;

        Ok(Self {
            registry,
            admissions,
            authorizations,
            rsvp_writes,
        })
    }

    pub fn record_admission(&self, allowed: bool) {
        self.admissions
            .with_label_values(&[if allowed { "allowed" } else { "limited" }])
            .inc();
    }

    pub fn record_authorization(&self, allowed: bool) {
        self.authorizations
            .with_label_values(&[if allowed { "allowed" } else { "denied" }])
            .inc();
    }

    pub fn record_write(&self, kind: &str) {
        self.rsvp_writes.with_label_values(&[kind]).inc();
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
