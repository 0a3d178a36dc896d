// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for abuse simulation.

use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of client addresses.
pub fn generate_ips(count: usize) -> Vec<IpAddr> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c))
        })
        .collect()
}

/// Identifiers that look like the admin domain but are not on its boundary.
pub fn generate_near_miss_emails(domain: &str) -> Vec<String> {
    let bare = domain.trim_start_matches('@');
    vec![
        format!("eve@not{}", bare),
        format!("eve@{}.evil.net", bare),
        format!("eve@{}x", bare),
        format!("eve-{}@gmail.com", bare),
        format!("eve@{}", bare.to_uppercase()),
        bare.replace('.', "-"),
        String::new(),
    ]
}

/// `X-Forwarded-For` values that cannot identify a client.
pub fn generate_unusable_forwarded() -> Vec<Option<&'static str>> {
    vec![
        None,
        Some(""),
        Some("unknown"),
        Some("not-an-ip, 10.0.0.1"),
        Some("999.1.1.1"),
        Some(" , "),
    ]
}
