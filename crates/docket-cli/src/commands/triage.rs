//! Triage command implementations.

use super::read_json;
use crate::cli::{CheckArgs, NewArgs, RateArgs, RecordArgs, TransitionArgs, TriageCommand};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docket_domain::{Rating, RatingLevel, TriageRecord};
use docket_gatekeeper::{self as gatekeeper, LevelWeights};
use std::fs;
use std::path::Path;

/// Priority formula used by the CLI: impact × urgency scaled down by complexity.
///
/// A zero complexity weight leaves the product unscaled.
pub fn catalog_priority(complexity: &Rating, impact_weight: f64, urgency_weight: f64) -> f64 {
    let product = impact_weight * urgency_weight;
    if complexity.weight > 0.0 {
        product / complexity.weight
    } else {
        product
    }
}

/// Execute a triage subcommand.
pub fn execute_triage(command: TriageCommand, config: &Config, formatter: &Formatter) -> Result<()> {
    match command {
        TriageCommand::New(args) => execute_new(args, formatter),
        TriageCommand::Show(args) => execute_show(args, formatter),
        TriageCommand::Transition(args) => execute_transition(args, formatter),
        TriageCommand::Check(args) => execute_check(args, formatter),
        TriageCommand::Rate(args) => execute_rate(args, config, formatter),
        TriageCommand::Priority(args) => execute_priority(args, formatter),
    }
}

fn execute_new(args: NewArgs, formatter: &Formatter) -> Result<()> {
    let record = gatekeeper::create_triage_record(&args.demand_id)?;
    emit_record(&record, args.output.as_deref(), formatter)
}

fn execute_show(args: RecordArgs, formatter: &Formatter) -> Result<()> {
    let record: TriageRecord = read_json(&args.record)?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

fn execute_transition(args: TransitionArgs, formatter: &Formatter) -> Result<()> {
    let record: TriageRecord = read_json(&args.record)?;
    let updated = gatekeeper::transition_triage(&record, args.status, &args.user)?;
    emit_record(&updated, args.output.as_deref(), formatter)
}

fn execute_check(args: CheckArgs, formatter: &Formatter) -> Result<()> {
    let record: TriageRecord = read_json(&args.record)?;
    let updated = gatekeeper::set_checklist_item(&record, &args.item, !args.undo)?;
    emit_record(&updated, args.output.as_deref(), formatter)
}

fn execute_rate(args: RateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record: TriageRecord = read_json(&args.record)?;
    let catalog = &config.engine.catalog;

    // Unspecified dimensions keep their current rating
    let impact = resolve(args.impact, record.impact, &catalog.impact)?;
    let urgency = resolve(args.urgency, record.urgency, &catalog.urgency)?;
    let complexity = resolve(args.complexity, record.complexity, &catalog.complexity)?;

    let updated = record.set_ratings(impact, urgency, complexity)?;
    emit_record(&updated, args.output.as_deref(), formatter)
}

fn resolve(
    level: Option<RatingLevel>,
    current: Option<Rating>,
    weights: &LevelWeights,
) -> Result<Option<Rating>> {
    match level {
        Some(level) => Ok(Some(weights.rating(level)?)),
        None => Ok(current),
    }
}

fn execute_priority(args: RecordArgs, formatter: &Formatter) -> Result<()> {
    let record: TriageRecord = read_json(&args.record)?;
    let priority = gatekeeper::compute_priority(&record, &catalog_priority);
    match formatter.format() {
        crate::config::OutputFormat::Json => println!(
            "{}",
            formatter.json(&serde_json::json!({
                "triage_id": record.id,
                "priority": priority,
            }))?
        ),
        _ => println!("{:.2}", priority),
    }
    Ok(())
}

/// Write the record to `output` as JSON, or print it in the active format.
fn emit_record(record: &TriageRecord, output: Option<&Path>, formatter: &Formatter) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, formatter.json(record)?)?;
            println!(
                "{}",
                formatter.success(&format!("Record {} written to {}", record.id, path.display()))
            );
        }
        None => println!("{}", formatter.format_record(record)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_priority() {
        let complexity = Rating::new(RatingLevel::Medium, 2.0).unwrap();
        assert_eq!(catalog_priority(&complexity, 3.0, 4.0), 6.0);

        let free = Rating::new(RatingLevel::Low, 0.0).unwrap();
        assert_eq!(catalog_priority(&free, 3.0, 4.0), 12.0);
    }

    #[test]
    fn test_resolve_keeps_current() {
        let weights = LevelWeights::default();
        let current = Some(Rating::new(RatingLevel::Low, 1.0).unwrap());
        assert_eq!(resolve(None, current, &weights).unwrap(), current);
        let high = resolve(Some(RatingLevel::High), current, &weights).unwrap().unwrap();
        assert_eq!(high.weight, 3.0);
    }
}
