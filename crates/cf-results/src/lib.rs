//! cf-results: versioned scenario result schema and storage.
//!
//! Replaces ad hoc reflective save/load with a self-describing schema:
//! every persisted value is a named scalar or array channel inside a
//! versioned, timestamped, content-hashed [`ScenarioResult`]. Sweep
//! drivers append one value per operating point to each channel and
//! persist the set under the scenario name.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::config_hash;
pub use store::{load_result, save_result};
pub use types::{SCHEMA_VERSION, ScenarioResult};

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Unknown channel: {name}")]
    UnknownChannel { name: String },
}
