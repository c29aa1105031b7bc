//! Docket CLI - Command-line interface for demand triage and duplicate detection.

use clap::Parser;
use docket_cli::commands;
use docket_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> docket_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Score(args) => commands::execute_score(args, &formatter),
        Command::Rank(args) => commands::execute_rank(args, &config, &formatter),
        Command::Markers(args) => commands::execute_markers(args, &formatter),
        Command::Readiness(args) => commands::execute_readiness(args, &config, &formatter),
        Command::Triage(command) => commands::execute_triage(command, &config, &formatter),
        Command::Suggest(args) => commands::execute_suggest(args, &config, &formatter),
        Command::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
