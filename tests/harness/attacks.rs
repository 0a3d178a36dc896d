// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Abuse patterns for security testing.

/// Abuse pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of unique client addresses
    pub unique_ips: usize,
    /// Send submissions without any usable client address
    pub anonymous: bool,
    /// Send bodies that fail validation
    pub invalid_bodies: bool,
    /// Run the submissions concurrently
    pub concurrent: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_ips: 1,
            anonymous: false,
            invalid_bodies: false,
            concurrent: false,
        }
    }
}

/// Predefined abuse patterns.
impl AttackConfig {
    /// One client hammering the submission form.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 200,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Same flood, all requests in flight at once.
    pub fn concurrent_flood() -> Self {
        Self {
            total_requests: 100,
            concurrent: true,
            ..Default::default()
        }
    }

    /// Many clients, each within its quota.
    pub fn distributed() -> Self {
        Self {
            total_requests: 500,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Clients hiding their address.
    pub fn anonymous_flood() -> Self {
        Self {
            total_requests: 50,
            anonymous: true,
            ..Default::default()
        }
    }

    /// Junk bodies from one client.
    pub fn junk_flood() -> Self {
        Self {
            total_requests: 30,
            invalid_bodies: true,
            ..Default::default()
        }
    }

    /// Most submissions any pattern should get through at the given limit.
    pub fn max_allowed(&self, max_per_client: usize) -> usize {
        if self.invalid_bodies {
            return 0;
        }
        let clients = if self.anonymous { 1 } else { self.unique_ips };
        let per_client = self.total_requests.div_ceil(clients);
        clients * per_client.min(max_per_client)
    }
}
