//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::error::Result;
use crate::output::Formatter;
use docket_gatekeeper::similarity;

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, formatter: &Formatter) -> Result<()> {
    let scores = similarity::score_detailed(&args.a, &args.b);
    println!(
        "{}",
        formatter.format_score(scores.combined, scores.edit, scores.ngram, scores.word)?
    );
    Ok(())
}
