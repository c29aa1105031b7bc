//! Markers command implementation.

use super::read_json;
use crate::cli::MarkersArgs;
use crate::error::Result;
use crate::output::Formatter;
use docket_domain::Demand;
use docket_gatekeeper::duplicates;

/// Execute the markers command.
pub fn execute_markers(args: MarkersArgs, formatter: &Formatter) -> Result<()> {
    let demand: Demand = read_json(&args.demand)?;
    let markers = duplicates::detect_markers(&demand)?;
    println!("{}", formatter.format_markers(&markers)?);
    Ok(())
}
