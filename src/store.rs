// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-process RSVP store.
//!
//! Guests are keyed by email and each guest owns at most one RSVP, so a
//! resubmission from the same address replaces the earlier answer.

use crate::error::{AppError, Result};
use crate::rsvp::{Guest, NewRsvp, Rsvp, RsvpStats, RsvpUpdate, ValidationError};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    guests: HashMap<Uuid, Guest>,
    guests_by_email: HashMap<String, Uuid>,
    rsvps: HashMap<Uuid, Rsvp>,
    rsvps_by_guest: HashMap<Uuid, Uuid>,
}

/// RSVP store wrapper.
#[derive(Default)]
pub struct RsvpStore {
    tables: RwLock<Tables>,
}

impl RsvpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the guest by email, then upsert that guest's RSVP.
    pub async fn upsert(&self, new: NewRsvp) -> Rsvp {
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        let guest_id = match tables.guests_by_email.get(&new.email).copied() {
            Some(id) => {
                if let Some(guest) = tables.guests.get_mut(&id) {
                    guest.name = new.name.clone();
                }
                id
            }
            None => {
                let guest = Guest {
                    id: Uuid::new_v4(),
                    email: new.email.clone(),
                    name: new.name.clone(),
                };
                let id = guest.id;
                tables.guests_by_email.insert(guest.email.clone(), id);
                tables.guests.insert(id, guest);
                id
            }
        };

        let existing = tables
            .rsvps_by_guest
            .get(&guest_id)
            .and_then(|rsvp_id| tables.rsvps.get(rsvp_id))
            .map(|r| (r.id, r.created_at));

        let (id, created_at) = existing.unwrap_or_else(|| (Uuid::new_v4(), now));
        let rsvp = Rsvp {
            id,
            user_id: guest_id,
            name: new.name,
            email: new.email,
            attending: new.attending,
            guest_count: new.guest_count,
            dietary_restrictions: new.dietary_restrictions,
            special_requests: new.special_requests,
            created_at,
            updated_at: now,
        };

        tables.rsvps_by_guest.insert(guest_id, id);
        tables.rsvps.insert(id, rsvp.clone());
        info!(rsvp_id = %id, replaced = existing.is_some(), "RSVP stored");
        rsvp
    }

    /// All RSVPs, newest first.
    pub async fn list(&self) -> Vec<Rsvp> {
        let tables = self.tables.read().await;
        let mut rsvps: Vec<Rsvp> = tables.rsvps.values().cloned().collect();
        rsvps.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        rsvps
    }

    /// Apply a validated edit. Email changes move the owning guest too.
    pub async fn update(&self, id: Uuid, update: RsvpUpdate) -> Result<Rsvp> {
        let mut tables = self.tables.write().await;
        let tables = &mut *tables;

        let rsvp = tables.rsvps.get_mut(&id).ok_or(AppError::NotFound(id))?;

        if let Some(email) = update.email.as_deref() {
            match tables.guests_by_email.get(email).copied() {
                Some(owner) if owner != rsvp.user_id => {
                    return Err(ValidationError::DuplicateEmail(email.to_string()).into());
                }
                Some(_) => {}
                None => {
                    tables.guests_by_email.remove(&rsvp.email);
                    tables
                        .guests_by_email
                        .insert(email.to_string(), rsvp.user_id);
                }
            }
        }

        update.apply(rsvp, Utc::now());

        if let Some(guest) = tables.guests.get_mut(&rsvp.user_id) {
            guest.email = rsvp.email.clone();
            guest.name = rsvp.name.clone();
        }

        info!(rsvp_id = %id, "RSVP updated");
        Ok(rsvp.clone())
    }

    /// Delete an RSVP. The guest record is kept.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        let rsvp = tables.rsvps.remove(&id).ok_or(AppError::NotFound(id))?;
        tables.rsvps_by_guest.remove(&rsvp.user_id);
        info!(rsvp_id = %id, "RSVP deleted");
        Ok(())
    }

    pub async fn stats(&self) -> RsvpStats {
        RsvpStats::from_rsvps(self.tables.read().await.rsvps.values())
    }
}
