//! Suggest command implementation.

use super::read_json;
use crate::cli::SuggestArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docket_domain::{Demand, RelatedReference, TriageRecord};
use docket_gatekeeper::{self as gatekeeper, duplicates};

/// Execute the suggest command.
pub fn execute_suggest(args: SuggestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record: TriageRecord = read_json(&args.record)?;
    let target: Demand = read_json(&args.target)?;
    ensure_same_demand(&record, &target)?;
    let pool: Vec<Demand> = match &args.pool {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let related: Vec<RelatedReference> = match &args.related {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let engine = &config.engine;
    let duplicate_signals = duplicates::find_duplicates(
        &target,
        &pool,
        &engine.duplicates.weights,
        engine.duplicates.threshold,
    )?;
    let readiness_signals = engine
        .readiness
        .evaluate(target.description.as_deref(), args.evidence);

    let suggestions = gatekeeper::generate_suggestions(
        &record,
        &duplicate_signals,
        &readiness_signals,
        &related,
    );
    println!("{}", formatter.format_suggestions(&suggestions)?);
    Ok(())
}

/// The record must belong to the demand being checked
fn ensure_same_demand(record: &TriageRecord, target: &Demand) -> Result<()> {
    if record.demand_id != target.id {
        return Err(CliError::InvalidInput(format!(
            "record {} belongs to demand {}, not {}",
            record.id, record.demand_id, target.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;

    fn write_inputs(record_demand: &str, target_id: &str) -> (tempfile::TempDir, SuggestArgs) {
        let dir = tempfile::tempdir().unwrap();
        let record = TriageRecord::new(record_demand).unwrap();
        let target = Demand::new(target_id, "Monthly report export error");

        let record_path = dir.path().join("record.json");
        let target_path = dir.path().join("target.json");
        fs::write(&record_path, serde_json::to_string(&record).unwrap()).unwrap();
        fs::write(&target_path, serde_json::to_string(&target).unwrap()).unwrap();

        let args = SuggestArgs {
            record: record_path,
            target: target_path,
            pool: None,
            related: None,
            evidence: 0,
        };
        (dir, args)
    }

    #[test]
    fn test_suggest_for_matching_demand() {
        let (_dir, args) = write_inputs("d-1", "d-1");
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(execute_suggest(args, &Config::default(), &formatter).is_ok());
    }

    #[test]
    fn test_suggest_rejects_record_of_other_demand() {
        let (_dir, args) = write_inputs("d-1", "d-2");
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let err = execute_suggest(args, &Config::default(), &formatter).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
