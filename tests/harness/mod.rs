// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for abuse simulation against the RSVP gate.
//!
//! Drives the full router with generated clients and principals and tallies
//! the outcome of every request.

pub mod attacks;
pub mod generators;
pub mod metrics;
