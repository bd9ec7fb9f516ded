use clap::Parser;
use std::io::{self, IsTerminal};
use tracking::cli::commands;
use tracking::cli::{Cli, Commands};
use tracking::config;
use tracking::logging::init_logging;
use tracking::{StructuredError, TrackingError};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.json) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(&cli) {
        handle_error(&e, cli.json);
    }
}

fn run(cli: &Cli) -> tracking::Result<()> {
    let layer = config::load_config(&cli.overrides())?;
    let server_config = config::ServerConfig::from_layer(&layer)?;

    match &cli.command {
        Commands::Serve { .. } => commands::serve::execute(&server_config),
        Commands::Init { force } => commands::init::execute(&server_config, *force, cli.json),
        Commands::Config => commands::config::execute(&layer, &server_config, cli.json),
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &TrackingError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}
