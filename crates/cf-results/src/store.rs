//! Result persistence.

use crate::types::{SCHEMA_VERSION, ScenarioResult};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::Path;

/// Write a result set as pretty-printed JSON.
pub fn save_result(path: &Path, result: &ScenarioResult) -> ResultsResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a result set, rejecting unknown schema versions.
pub fn load_result(path: &Path) -> ResultsResult<ScenarioResult> {
    let content = fs::read_to_string(path)?;
    let result: ScenarioResult = serde_json::from_str(&content)?;
    if result.schema_version != SCHEMA_VERSION {
        return Err(ResultsError::VersionMismatch {
            found: result.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(result)
}
