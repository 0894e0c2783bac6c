//! The external generation/export service.
//!
//! The pipeline never talks to the service directly; it goes through the
//! [`Collaborator`] trait so the controller and the TUI can be driven by an
//! in-process fake in tests.

mod http;

pub use http::HttpCollaborator;

use crate::error::Result;
use crate::model::{FieldVisibility, ProfileRecord};
use chrono::NaiveDate;
use serde::de::Error as _;
use serde_json::Value;
use tracing::warn;

/// Smallest and largest number of profiles one request may ask for
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 1000;

/// Default backend address of the generator service
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5010";

/// A generation request: how many profiles, and which fields to include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest {
    pub count: u32,
    pub visibility: FieldVisibility,
}

impl GenerateRequest {
    /// Build a request, clamping `count` into the accepted range
    pub fn new(count: u32, visibility: FieldVisibility) -> Self {
        Self {
            count: count.clamp(MIN_COUNT, MAX_COUNT),
            visibility,
        }
    }

    /// URL query string (`count=..&includeFirstName=..`)
    pub fn query_string(&self) -> String {
        let mut parts = vec![format!("count={}", self.count)];
        parts.extend(
            self.visibility
                .request_params()
                .into_iter()
                .map(|(param, value)| format!("{param}={value}")),
        );
        parts.join("&")
    }
}

/// A file produced by the export service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// The generation and export service
pub trait Collaborator: Send + Sync {
    /// Generate a fresh raw set
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<ProfileRecord>>;

    /// Export `records` (the displayed sequence) to a spreadsheet file
    fn export_records(&self, records: &[ProfileRecord]) -> Result<ExportFile>;
}

/// Keys a profile object may carry on the wire
const RECORD_KEYS: [&str; 10] = [
    "first_name",
    "last_name",
    "full_name",
    "email",
    "email_valid",
    "id",
    "id_valid",
    "gender",
    "age",
    "city",
];

/// Decode one profile object. Objects carrying none of the profile keys
/// (such as `{"error": ..}`) are not profiles.
fn decode_record(value: Value) -> serde_json::Result<ProfileRecord> {
    let Value::Object(map) = &value else {
        return Err(serde_json::Error::custom("profile is not a JSON object"));
    };
    if let Some(message) = map.get("error") {
        return Err(serde_json::Error::custom(format!("service error: {message}")));
    }
    if !RECORD_KEYS.iter().any(|key| map.contains_key(*key)) {
        return Err(serde_json::Error::custom("object has no profile fields"));
    }
    serde_json::from_value(value)
}

/// Decode a generation response body.
///
/// The service answers an array, or a single object for `count=1`. Array
/// elements that are not profile objects are skipped; the rest still load.
pub fn decode_profiles(body: &[u8]) -> serde_json::Result<Vec<ProfileRecord>> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Array(items) => {
            let total = items.len();
            let records: Vec<ProfileRecord> = items
                .into_iter()
                .enumerate()
                .filter_map(|(i, item)| match decode_record(item) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(index = i, "skipping malformed profile: {e}");
                        None
                    }
                })
                .collect();
            if records.len() < total {
                warn!(kept = records.len(), total, "response had malformed profiles");
            }
            Ok(records)
        }
        object @ Value::Object(_) => decode_record(object).map(|record| vec![record]),
        _ => Err(serde_json::Error::custom(
            "expected a profile array or a single profile object",
        )),
    }
}

/// File name the export is saved under
pub fn export_file_name(date: NaiveDate) -> String {
    format!("israeli_profiles_{}.xlsx", date.format("%Y-%m-%d"))
}
