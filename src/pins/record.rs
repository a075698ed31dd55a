//! Pin record types

use serde::{Deserialize, Serialize};

/// One craft project entry.
///
/// Serialized field names and order match the collection file the frontend
/// reads, so a save/load round trip leaves records field-for-field equal.
/// `pdf` and `image` hold site-root-relative paths, or empty strings while
/// unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Unique identifier, assigned as one past the current maximum
    pub id: u64,

    pub title: String,

    /// Extracted thumbnail path, empty until the extraction job fills it in
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Uploaded PDF path, empty if none was supplied
    #[serde(default)]
    pub pdf: String,

    #[serde(default)]
    pub used_materials: Vec<String>,

    #[serde(default)]
    pub difficulty: String,

    /// Set once at creation, `YYYY-MM-DD`
    #[serde(default)]
    pub creation_date: String,

    #[serde(default)]
    pub time: String,

    #[serde(default)]
    pub production_cost: String,
}

/// Id for a new pin: one past the current maximum, starting at 1.
pub fn next_id(pins: &[Pin]) -> u64 {
    pins.iter().map(|pin| pin.id).max().unwrap_or(0) + 1
}

/// Split a comma-separated form field into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
