//! fic: convert JSON documents to and from the Firestore REST format.
//!
//! - `fic preview -f IN...` prints converted documents to stdout
//! - `fic generate -f IN... -o OUT...` writes them to files
//!
//! Logs go to stderr so preview output can be piped.

mod commands;
mod parse;

use std::io;
use std::process;

use firestore_json_engine::{BatchConverter, EngineConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use parse::{matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();

    let exit_code = match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn run(matches: &clap::ArgMatches) -> Result<i32, String> {
    let (action, globals) = matches_to_action(matches)?;

    let config = EngineConfig::load_or_default(globals.config.as_deref())
        .map_err(|e| e.to_string())?
        .with_max_depth(globals.max_depth)
        .with_direction(globals.direction)
        .with_compact(globals.compact);

    init_logging(&config.log_level, globals.verbose)?;
    debug!(?config, "configuration resolved");

    let batch = match action {
        CliAction::Preview { inputs } => BatchConverter::preview(inputs),
        CliAction::Generate { inputs, outputs } => BatchConverter::generate(inputs, outputs),
    }
    .map_err(|e| e.to_string())?
    .with_processor(config.processor())
    .direction(config.direction)
    .pretty(config.pretty);

    let stdout = io::stdout();
    let report = batch.run(&mut stdout.lock());

    for failed in &report.failed {
        eprintln!("(error) {}: {}", failed.input.display(), failed.error);
    }
    eprintln!("{}", report.summary());

    Ok(if report.is_success() { 0 } else { 1 })
}

/// Install the stderr subscriber.
///
/// `-v` wins, then `RUST_LOG`, then the configured level.
fn init_logging(level: &str, verbose: bool) -> Result<(), String> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(level)
                .map_err(|e| format!("Invalid log level '{}': {}", level, e))?,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))
}
