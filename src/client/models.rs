//! DigitalOcean API model types

use serde::{Deserialize, Serialize};

/// A droplet (virtual machine) from the account inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    /// Droplet ID, unique within the account
    pub id: u64,

    /// Display name
    pub name: String,

    /// Attached network interfaces
    #[serde(default)]
    pub networks: Networks,
}

/// Network interfaces grouped by IP version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Networks {
    /// IPv4 interfaces
    #[serde(default)]
    pub v4: Vec<NetworkInterface>,
}

/// A single network interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// Interface address
    pub ip_address: String,

    /// Interface class: `public`, `private`, or something we ignore
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response envelope for `GET /droplets`
#[derive(Debug, Deserialize)]
pub struct DropletsResponse {
    pub droplets: Vec<Droplet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_droplet_deserializes_api_shape() {
        let json = r#"{
            "id": 3164444,
            "name": "web-1",
            "status": "active",
            "networks": {
                "v4": [
                    { "ip_address": "104.236.32.182", "netmask": "255.255.192.0", "type": "public" },
                    { "ip_address": "10.128.0.2", "type": "private" }
                ],
                "v6": []
            }
        }"#;

        let droplet: Droplet = serde_json::from_str(json).unwrap();
        assert_eq!(droplet.id, 3164444);
        assert_eq!(droplet.name, "web-1");
        assert_eq!(droplet.networks.v4.len(), 2);
        assert_eq!(droplet.networks.v4[0].kind, "public");
    }

    #[test]
    fn test_droplet_without_networks() {
        let droplet: Droplet = serde_json::from_str(r#"{"id": 1, "name": "bare"}"#).unwrap();
        assert!(droplet.networks.v4.is_empty());
    }

    #[test]
    fn test_interface_serializes_type_field() {
        let iface = NetworkInterface {
            ip_address: "1.1.1.1".to_string(),
            kind: "public".to_string(),
        };
        let json = serde_json::to_string(&iface).unwrap();
        assert!(json.contains("\"type\":\"public\""));
    }
}
