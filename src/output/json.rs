//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// `{data, meta}` envelope around JSON command output
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Meta,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    /// RFC 3339 time the output was produced
    pub timestamp: String,
    /// dropletconn version
    pub version: &'static str,
    /// Number of rows, for list-shaped data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<'a, T: ?Sized> JsonOutput<'a, T> {
    pub fn new(data: &'a T, count: Option<usize>) -> Self {
        Self {
            data,
            meta: Meta {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION"),
                count,
            },
        }
    }
}

/// Pretty-print rows inside the envelope, with their count
pub fn format_rows<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(rows, Some(rows.len())))
}
