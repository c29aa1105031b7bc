//! Readiness command implementation.

use super::read_json;
use crate::cli::ReadinessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docket_domain::Demand;
use docket_gatekeeper::readiness;

/// Execute the readiness command.
pub fn execute_readiness(args: ReadinessArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let description = match (args.description, args.demand) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => read_json::<Demand>(&path)?.description,
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Provide either --description or --demand".to_string(),
            ))
        }
    };

    let thresholds = &config.engine.readiness;
    let signals = readiness::evaluate(
        description.as_deref(),
        args.evidence,
        thresholds.require_evidence && !args.no_require_evidence,
        args.min_words.unwrap_or(thresholds.min_words),
        args.min_chars.unwrap_or(thresholds.min_chars),
    );

    println!("{}", formatter.format_readiness(&signals)?);
    Ok(())
}
