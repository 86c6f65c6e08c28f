//! staffdesk developer CLI
//!
//! Library half of the `staffdesk` binary: the clap command tree, config
//! loading and the subcommands, kept here so they can be driven from tests.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod logging;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::Config;
use serde_json::Value;
use staffdesk_schema::SchemaRegistry;
use std::io::Write;
use std::path::PathBuf;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the command tree
#[must_use]
pub fn command() -> Command {
    Command::new("staffdesk")
        .version(VERSION)
        .about("Validate staff records and forms, inspect the mock store")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to staffdesk.toml"),
        )
        .subcommand(Command::new("schemas").about("List registered schema names"))
        .subcommand(
            Command::new("validate")
                .about("Validate a JSON or YAML candidate against a schema")
                .arg(Arg::new("schema").required(true).help("Schema name"))
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("Candidate file, or - for stdin"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Print the JSON Schema of a registered schema")
                .arg(Arg::new("schema").required(true).help("Schema name")),
        )
        .subcommand(
            Command::new("mock")
                .about("Generate candidates that pass a schema")
                .arg(Arg::new("schema").required(true).help("Schema name"))
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Number of candidates"),
                ),
        )
        .subcommand(Command::new("snapshot").about("Print the seed snapshot as JSON"))
        .subcommand(
            Command::new("audit")
                .about("Report dangling references and duplicate ids")
                .arg(
                    Arg::new("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Snapshot file (JSON or YAML); defaults to the seed"),
                ),
        )
}

/// Load the configuration named by `--config`, if any
///
/// # Errors
/// Returns error if the configuration cannot be read or parsed
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
}

fn schema_arg(args: &ArgMatches) -> anyhow::Result<&str> {
    args.get_one::<String>("schema")
        .map(String::as_str)
        .context("missing schema name")
}

/// Run the selected subcommand; `Ok(false)` means the input failed its check
///
/// # Errors
/// Returns error on unreadable input, unknown schema or write failure
pub fn execute(matches: &ArgMatches, config: &Config, out: &mut dyn Write) -> anyhow::Result<bool> {
    let registry = SchemaRegistry::with_config(config.registry);

    match matches.subcommand() {
        Some(("schemas", _)) => commands::schemas(&registry, out),
        Some(("validate", args)) => {
            let schema = schema_arg(args)?;
            let file = args
                .get_one::<String>("file")
                .context("missing candidate file")?;
            let candidate: Value = commands::read_document(file)?;
            commands::validate(&registry, schema, &candidate, args.get_flag("json"), out)
        }
        Some(("export", args)) => commands::export(&registry, schema_arg(args)?, out),
        Some(("mock", args)) => {
            let seed = args.get_one::<u64>("seed").copied();
            let count = args.get_one::<usize>("count").copied().unwrap_or(1);
            commands::mock(&registry, schema_arg(args)?, seed, count, out)
        }
        Some(("snapshot", _)) => commands::snapshot(out),
        Some(("audit", args)) => {
            commands::audit(args.get_one::<PathBuf>("file").map(PathBuf::as_path), out)
        }
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
}
