//! Result data types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current schema version; bumped whenever the persisted layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// A named set of scalar and array channels for one scenario.
///
/// Channels are plain `f64` values keyed by name (BTreeMap keeps the
/// serialized form stable), so downstream sweep and plotting tools can
/// consume results without knowing the producing code's variable names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub schema_version: u32,
    pub scenario: String,
    /// RFC 3339 creation timestamp.
    pub created: String,
    /// SHA-256 hash of the originating configuration JSON.
    pub config_hash: String,
    #[serde(default)]
    pub scalars: BTreeMap<String, f64>,
    #[serde(default)]
    pub arrays: BTreeMap<String, Vec<f64>>,
}

impl ScenarioResult {
    pub fn new(scenario: impl Into<String>, config_hash: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            scenario: scenario.into(),
            created: chrono::Utc::now().to_rfc3339(),
            config_hash: config_hash.into(),
            scalars: BTreeMap::new(),
            arrays: BTreeMap::new(),
        }
    }

    pub fn set_scalar(&mut self, name: impl Into<String>, value: f64) {
        self.scalars.insert(name.into(), value);
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.scalars.get(name).copied()
    }

    /// Append one value to an array channel, creating it on first use.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.arrays.entry(name.into()).or_default().push(value);
    }

    pub fn array(&self, name: &str) -> Option<&[f64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }
}
