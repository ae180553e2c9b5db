//! Display models for table and JSON output

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::client::Droplet;

/// Droplet row for `list` output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DropletDisplay {
    #[tabled(rename = "Id")]
    pub id: u64,

    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "Public IP")]
    pub public_ip: String,

    #[tabled(rename = "Private IP")]
    pub private_ip: String,
}

impl From<&Droplet> for DropletDisplay {
    fn from(droplet: &Droplet) -> Self {
        let addresses = droplet.addresses();
        Self {
            id: droplet.id,
            name: droplet.name.clone(),
            public_ip: addresses.public.join(", "),
            private_ip: addresses.private.join(", "),
        }
    }
}

/// Outcome of an SSH reachability probe for one droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Failed,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Ok => write!(f, "{}", "✓".green()),
            ProbeStatus::Failed => write!(f, "{}", "✗".red()),
        }
    }
}

/// Row for `test` output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProbeDisplay {
    #[tabled(rename = "")]
    pub status: ProbeStatus,

    #[tabled(rename = "Id")]
    pub id: u64,

    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "Public IP")]
    pub public_ip: String,

    #[tabled(rename = "Detail")]
    pub detail: String,
}

impl ProbeDisplay {
    pub fn new(droplet: &Droplet, status: ProbeStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            id: droplet.id,
            name: droplet.name.clone(),
            public_ip: droplet.addresses().first_public().unwrap_or("").to_string(),
            detail: detail.into(),
        }
    }
}
