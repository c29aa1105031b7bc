//! Command implementations.

pub mod markers;
pub mod rank;
pub mod readiness;
pub mod score;
pub mod suggest;
pub mod triage;

pub use self::markers::execute_markers;
pub use self::rank::execute_rank;
pub use self::readiness::execute_readiness;
pub use self::score::execute_score;
pub use self::suggest::execute_suggest;
pub use self::triage::execute_triage;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and deserialize a JSON input file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let value = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "Read input file");
    Ok(value)
}
