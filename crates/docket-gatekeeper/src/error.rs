//! Gatekeeper error types

use docket_domain::TriageError;
use thiserror::Error;

/// Errors that can occur while loading gatekeeper configuration
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration values are out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Engine rejected an input
    #[error(transparent)]
    Triage(#[from] TriageError),
}
