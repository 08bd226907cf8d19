//! ArgMatches → CliAction conversion.
//!
//! Global flags are read from the subcommand's matches, where clap places
//! them wherever they were written on the command line.

use clap::ArgMatches;
use firestore_json_engine::Direction;
use std::path::PathBuf;

/// What the user asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Preview {
        inputs: Vec<PathBuf>,
    },
    Generate {
        inputs: Vec<PathBuf>,
        outputs: Vec<PathBuf>,
    },
}

/// Flags shared by every subcommand. `None` leaves the configured value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub direction: Option<Direction>,
    pub max_depth: Option<usize>,
    pub compact: bool,
    pub verbose: bool,
}

/// Convert clap ArgMatches into a CliAction and the global flags.
pub fn matches_to_action(matches: &ArgMatches) -> Result<(CliAction, GlobalOptions), String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let action = match sub_name {
        "preview" => CliAction::Preview {
            inputs: paths(sub_matches, "file"),
        },
        "generate" => CliAction::Generate {
            inputs: paths(sub_matches, "file"),
            outputs: paths(sub_matches, "output"),
        },
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok((action, parse_globals(sub_matches)?))
}

fn parse_globals(matches: &ArgMatches) -> Result<GlobalOptions, String> {
    let direction = matches
        .get_one::<String>("direction")
        .map(|s| s.parse::<Direction>())
        .transpose()?;
    let max_depth = matches
        .get_one::<String>("max-depth")
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|e| format!("Invalid max-depth: {}", e))?;

    Ok(GlobalOptions {
        config: matches.get_one::<String>("config").map(PathBuf::from),
        direction,
        max_depth,
        compact: matches.get_flag("compact"),
        verbose: matches.get_flag("verbose"),
    })
}

fn paths(matches: &ArgMatches, id: &str) -> Vec<PathBuf> {
    matches
        .get_many::<String>(id)
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default()
}
