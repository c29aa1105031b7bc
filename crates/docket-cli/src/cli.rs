//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use docket_domain::{RatingLevel, TriageStatus};
use std::path::PathBuf;

/// Docket CLI - Triage demands and detect duplicates.
#[derive(Debug, Parser)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOCKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and scores only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score the similarity of two texts (0-100)
    Score(ScoreArgs),

    /// Rank a pool of demands against a target demand
    Rank(RankArgs),

    /// Detect duplicate markers in a demand
    Markers(MarkersArgs),

    /// Evaluate description detail and evidence
    Readiness(ReadinessArgs),

    /// Manage triage records
    #[command(subcommand)]
    Triage(TriageCommand),

    /// Generate suggestions for a triage record
    Suggest(SuggestArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// First text
    pub a: String,

    /// Second text
    pub b: String,
}

/// Arguments for the rank command.
#[derive(Debug, Parser)]
pub struct RankArgs {
    /// JSON file with the target demand
    #[arg(short, long)]
    pub target: PathBuf,

    /// JSON file with an array of candidate demands
    #[arg(short, long)]
    pub pool: PathBuf,

    /// Only keep candidates at or above this score (defaults to the configured threshold)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Show every candidate, ignoring the threshold
    #[arg(long, conflicts_with = "threshold")]
    pub all: bool,
}

/// Arguments for the markers command.
#[derive(Debug, Parser)]
pub struct MarkersArgs {
    /// JSON file with the demand
    pub demand: PathBuf,
}

/// Arguments for the readiness command.
#[derive(Debug, Parser)]
pub struct ReadinessArgs {
    /// Description text
    #[arg(short, long, conflicts_with = "demand")]
    pub description: Option<String>,

    /// JSON file with the demand whose description is evaluated
    #[arg(long)]
    pub demand: Option<PathBuf>,

    /// Number of evidence items attached
    #[arg(short, long, default_value = "0")]
    pub evidence: u32,

    /// Override the minimum word count
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Override the minimum character count
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Do not require evidence
    #[arg(long)]
    pub no_require_evidence: bool,
}

/// Triage subcommands.
#[derive(Debug, Subcommand)]
pub enum TriageCommand {
    /// Create a pending triage record for a demand
    New(NewArgs),

    /// Show a record's checklist and readiness
    Show(RecordArgs),

    /// Move a record to another status
    Transition(TransitionArgs),

    /// Tick (or untick) a checklist item
    Check(CheckArgs),

    /// Set impact, urgency and complexity ratings
    Rate(RateArgs),

    /// Compute the priority score
    Priority(RecordArgs),
}

/// Arguments for `triage new`.
#[derive(Debug, Parser)]
pub struct NewArgs {
    /// Demand identifier
    pub demand_id: String,

    /// Write the record to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments naming a record file.
#[derive(Debug, Parser)]
pub struct RecordArgs {
    /// JSON file with the triage record
    pub record: PathBuf,
}

/// Arguments for `triage transition`.
#[derive(Debug, Parser)]
pub struct TransitionArgs {
    /// JSON file with the triage record
    pub record: PathBuf,

    /// Target status
    #[arg(value_parser = parse_status)]
    pub status: TriageStatus,

    /// Acting user id
    #[arg(short, long, env = "DOCKET_USER")]
    pub user: String,

    /// Write the updated record to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `triage check`.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// JSON file with the triage record
    pub record: PathBuf,

    /// Checklist item id
    pub item: String,

    /// Mark the item as not completed
    #[arg(long)]
    pub undo: bool,

    /// Write the updated record to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `triage rate`.
#[derive(Debug, Parser)]
pub struct RateArgs {
    /// JSON file with the triage record
    pub record: PathBuf,

    /// Impact level
    #[arg(long, value_parser = parse_level)]
    pub impact: Option<RatingLevel>,

    /// Urgency level
    #[arg(long, value_parser = parse_level)]
    pub urgency: Option<RatingLevel>,

    /// Complexity level
    #[arg(long, value_parser = parse_level)]
    pub complexity: Option<RatingLevel>,

    /// Write the updated record to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the suggest command.
#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// JSON file with the triage record
    #[arg(short, long)]
    pub record: PathBuf,

    /// JSON file with the demand being triaged
    #[arg(short, long)]
    pub target: PathBuf,

    /// JSON file with an array of other demands to check for duplicates
    #[arg(short, long)]
    pub pool: Option<PathBuf>,

    /// JSON file with an array of related discovery references
    #[arg(long)]
    pub related: Option<PathBuf>,

    /// Number of evidence items attached to the demand
    #[arg(short, long, default_value = "0")]
    pub evidence: u32,
}

fn parse_status(s: &str) -> Result<TriageStatus, String> {
    s.parse()
}

fn parse_level(s: &str) -> Result<RatingLevel, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transition() {
        let cli = Cli::try_parse_from([
            "docket",
            "triage",
            "transition",
            "record.json",
            "ready-for-discovery",
            "--user",
            "user-1",
        ])
        .unwrap();
        match cli.command {
            Command::Triage(TriageCommand::Transition(args)) => {
                assert_eq!(args.status, TriageStatus::ReadyForDiscovery);
                assert_eq!(args.user, "user-1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_level() {
        let result = Cli::try_parse_from(["docket", "triage", "rate", "r.json", "--impact", "huge"]);
        assert!(result.is_err());
    }
}
