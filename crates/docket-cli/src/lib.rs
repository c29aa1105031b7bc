//! Docket CLI library.
//!
//! Command-line front end for the Docket triage engine: configuration
//! loading, command execution and output formatting. Demands and triage
//! records are exchanged as JSON files; nothing is persisted implicitly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
