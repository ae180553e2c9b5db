//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{Droplet, NetworkInterface, Networks};

/// Builder for creating test Droplet instances.
///
/// # Example
/// ```ignore
/// let droplet = DropletBuilder::new(1, "web-1")
///     .public("1.1.1.1")
///     .private("10.0.0.1")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct DropletBuilder {
    id: u64,
    name: String,
    interfaces: Vec<NetworkInterface>,
}

impl DropletBuilder {
    /// Create a new builder with the given ID and name.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            interfaces: Vec::new(),
        }
    }

    /// Add a public interface.
    pub fn public(self, ip: &str) -> Self {
        self.interface(ip, "public")
    }

    /// Add a private interface.
    pub fn private(self, ip: &str) -> Self {
        self.interface(ip, "private")
    }

    /// Add an interface with an arbitrary type tag.
    pub fn interface(mut self, ip: &str, kind: &str) -> Self {
        self.interfaces.push(NetworkInterface {
            ip_address: ip.to_string(),
            kind: kind.to_string(),
        });
        self
    }

    pub fn build(self) -> Droplet {
        Droplet {
            id: self.id,
            name: self.name,
            networks: Networks {
                v4: self.interfaces,
            },
        }
    }
}

/// Three droplets: `db-1`, `db-2`, `web-1`, each with one public and one private address.
pub fn sample_inventory() -> Vec<Droplet> {
    vec![
        DropletBuilder::new(101, "db-1")
            .public("203.0.113.11")
            .private("10.0.0.11")
            .build(),
        DropletBuilder::new(102, "db-2")
            .public("203.0.113.12")
            .private("10.0.0.12")
            .build(),
        DropletBuilder::new(201, "web-1")
            .public("198.51.100.21")
            .private("10.0.1.21")
            .build(),
    ]
}
