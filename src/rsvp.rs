// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! RSVP models and submission validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Largest party a single RSVP may bring.
pub const MAX_GUEST_COUNT: u8 = 10;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Email already belongs to another guest: {0}")]
    DuplicateEmail(String),
}

/// A guest, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// A stored RSVP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub attending: bool,
    pub guest_count: u8,
    pub dietary_restrictions: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw submission body as posted by the RSVP form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub attending: bool,
    #[serde(default)]
    pub guest_count: Option<i64>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub name: String,
    pub email: String,
    pub attending: bool,
    pub guest_count: u8,
    pub dietary_restrictions: Option<String>,
    pub special_requests: Option<String>,
}

/// Partial admin edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub attending: Option<bool>,
    #[serde(default)]
    pub guest_count: Option<i64>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Dashboard summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpStats {
    pub total_responses: usize,
    pub attending: usize,
    pub not_attending: usize,
    pub total_guests: u64,
}

impl RsvpStats {
    pub fn from_rsvps<'a>(rsvps: impl IntoIterator<Item = &'a Rsvp>) -> Self {
        rsvps.into_iter().fold(Self::default(), |mut stats, rsvp| {
            stats.total_responses += 1;
            if rsvp.attending {
                stats.attending += 1;
                stats.total_guests += u64::from(rsvp.guest_count);
            } else {
                stats.not_attending += 1;
            }
            stats
        })
    }
}

/// Clamp a guest count into `0..=MAX_GUEST_COUNT`.
pub fn clamp_guest_count(count: Option<i64>) -> u8 {
    // Fits in u8 after clamping
    count.unwrap_or(0).clamp(0, i64::from(MAX_GUEST_COUNT)) as u8
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

impl RsvpSubmission {
    /// Validate required fields and normalise the rest.
    pub fn validate(self) -> Result<NewRsvp, ValidationError> {
        let name = non_blank(self.name).ok_or(ValidationError::MissingField("name"))?;
        let email = non_blank(self.email).ok_or(ValidationError::MissingField("email"))?;
        validate_email(&email)?;

        let guest_count = clamp_guest_count(self.guest_count);
        debug!(%email, attending = self.attending, guest_count, "RSVP submission valid");

        Ok(NewRsvp {
            name,
            email,
            attending: self.attending,
            guest_count,
            dietary_restrictions: non_blank(self.dietary_restrictions),
            special_requests: non_blank(self.special_requests),
        })
    }
}

impl RsvpUpdate {
    /// Reject edits that would blank out required fields.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if let Some(name) = self.name.take() {
            self.name = Some(non_blank(Some(name)).ok_or(ValidationError::MissingField("name"))?);
        }
        if let Some(email) = self.email.take() {
            let email = non_blank(Some(email)).ok_or(ValidationError::MissingField("email"))?;
            validate_email(&email)?;
            self.email = Some(email);
        }
        Ok(self)
    }

    /// Apply this edit to a stored RSVP.
    pub fn apply(self, rsvp: &mut Rsvp, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            rsvp.name = name;
        }
        if let Some(email) = self.email {
            rsvp.email = email;
        }
        if let Some(attending) = self.attending {
            rsvp.attending = attending;
        }
        if self.guest_count.is_some() {
            rsvp.guest_count = clamp_guest_count(self.guest_count);
        }
        if self.dietary_restrictions.is_some() {
            rsvp.dietary_restrictions = non_blank(self.dietary_restrictions);
        }
        if self.special_requests.is_some() {
            rsvp.special_requests = non_blank(self.special_requests);
        }
        rsvp.updated_at = now;
    }
}
