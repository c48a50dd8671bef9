//! `jdex` command-line tool
//!
//! The command tree is built with the clap builder API in [`cli`] and
//! dispatched by [`run`].

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod commands;
mod editor;
mod settings;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use settings::Settings;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "JDEX_LOG";

/// Build the command tree
#[must_use]
pub fn cli() -> Command {
    Command::new("jdex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage a Johnny.Decimal system")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("store")
                .short('C')
                .long("store")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to store"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to configuration file"),
        )
        .arg(
            Arg::new("editor")
                .short('e')
                .long("editor")
                .global(true)
                .help("Text editor to open entries with"),
        )
        .arg(
            Arg::new("non-interactive")
                .long("non-interactive")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Fail instead of asking questions"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(Command::new("new").about("Create a new store"))
        .subcommand(
            Command::new("list")
                .about("Print the index")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("path")
                .about("Print the directory of an entry")
                .arg(Arg::new("id").required(true).help("ID of the entry")),
        )
        .subcommand(Command::new("check").about("Validate the index file"))
        .subcommand(
            Command::new("edit")
                .about("Edit an entry in the store")
                .arg(Arg::new("id").required(true).help("ID of the entry to edit"))
                .arg(
                    Arg::new("name")
                        .help("Providing a name will rename the entry, creating it if needed"),
                ),
        )
}

/// Install the stderr log subscriber
///
/// `verbose` forces the `debug` level; otherwise `JDEX_LOG` is honoured,
/// defaulting to `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the selected subcommand
///
/// # Errors
/// Any failure of the subcommand, with context.
pub fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = Settings::from_matches(matches)?;
    tracing::debug!("Using store at {}", settings.store.root.display());

    match matches.subcommand() {
        Some(("new", _)) => commands::new(&settings),
        Some(("list", args)) => commands::list(&settings, args.get_flag("json")),
        Some(("path", args)) => commands::path(&settings, required(args, "id")?),
        Some(("check", _)) => commands::check(&settings),
        Some(("edit", args)) => commands::edit(
            &settings,
            required(args, "id")?,
            args.get_one::<String>("name").map(String::as_str),
        ),
        Some((other, _)) => anyhow::bail!("unknown command {other:?}"),
        None => anyhow::bail!("no command given"),
    }
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing argument <{name}>"))
}
