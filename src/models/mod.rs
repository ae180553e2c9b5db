//! Inventory models for CLI commands
//!
//! Filter matching over droplets plus the display types used for table and
//! JSON output.

pub mod display;
pub mod filter;

pub use display::{DropletDisplay, ProbeDisplay, ProbeStatus};
pub use filter::{FilterSet, find_by_exact_name, names_containing};
