//! Rank command implementation.

use super::read_json;
use crate::cli::RankArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docket_domain::Demand;
use docket_gatekeeper::duplicates;

/// Execute the rank command.
pub fn execute_rank(args: RankArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let target: Demand = read_json(&args.target)?;
    let pool: Vec<Demand> = read_json(&args.pool)?;
    let weights = &config.engine.duplicates.weights;

    let signals = if args.all {
        duplicates::rank_candidates(&target, &pool, weights)?
    } else {
        let threshold = args.threshold.unwrap_or(config.engine.duplicates.threshold);
        duplicates::find_duplicates(&target, &pool, weights, threshold)?
    };

    tracing::info!(
        target = %target.id,
        pool = pool.len(),
        matches = signals.len(),
        "Ranked duplicate candidates"
    );
    println!("{}", formatter.format_signals(&signals)?);
    Ok(())
}
