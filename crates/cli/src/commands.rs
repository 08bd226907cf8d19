//! Clap command tree for `fic`.

use clap::{Arg, ArgAction, Command};

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("fic")
        .about("Convert JSON documents to and from the Firestore REST format")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("direction")
                .long("direction")
                .short('d')
                .global(true)
                .value_parser(["auto", "decode", "encode"])
                .help("Conversion direction (default: auto)"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .global(true)
                .value_name("N")
                .help("Deepest container nesting accepted"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print documents on a single line"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand(
            Command::new("preview")
                .about("Convert files in memory and print the results")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("generate")
                .about("Convert files and write the results to output files")
                .arg(file_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("OUT")
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .help("Output file for each input, in the same order"),
                ),
        )
}

fn file_arg() -> Arg {
    Arg::new("file")
        .long("file")
        .short('f')
        .value_name("IN")
        .num_args(1..)
        .action(ArgAction::Append)
        .required(true)
        .help("JSON file to convert")
}
