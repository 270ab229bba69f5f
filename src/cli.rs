//! CLI definitions and dispatch
//!
//! Mode words like `all` and `indeed` are free-form positionals validated by
//! the commands themselves, so malformed invocations render the `Usage:`
//! contract instead of clap's own error text.

use clap::{Parser, Subcommand};

use crate::commands;
use duster::error::{Error, Result, UsageKind};
use duster::paths;

/// duster - quarantine stale files into dated boxes and expire them on
/// schedule
#[derive(Parser, Debug)]
#[command(
    name = "duster",
    version,
    disable_help_subcommand = true,
    about = "Quarantine stale files into dated boxes and expire them on schedule",
    long_about = "duster watches a working tree for files nobody touches anymore.\n\n\
                  \"sweep\" moves stale entries into a dated quarantine box;\n\
                  \"burn\" permanently deletes boxes once their retention window passes.\n\
                  \"start\" keeps both running unattended via cron."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register the current directory (create .duster/)
    Init,

    /// Delete all duster state for this directory
    Destroy {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Report stale entries, or quarantine them with "indeed"
    Sweep {
        /// Mode words: "all" (ignore file age), "indeed" (actually move)
        #[arg(value_name = "MODE")]
        modes: Vec<String>,
    },

    /// Report expired boxes, or delete them with "indeed"
    Burn {
        /// Mode word: "indeed" (actually delete)
        #[arg(value_name = "MODE")]
        modes: Vec<String>,

        /// Skip the confirmation prompt (used by scheduled runs)
        #[arg(long)]
        force: bool,
    },

    /// Show the retention policy, or change it with "set <key> <value>"
    Config {
        /// Either empty, or: set <key> <value>
        #[arg(value_name = "ARG")]
        args: Vec<String>,
    },

    /// Manage the ignore list
    Ignore {
        /// <add|remove|current|clear> followed by paths where applicable
        #[arg(value_name = "ARG")]
        args: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Register scheduled sweep/burn/patrol with cron
    Start,

    /// Remove this directory's cron entries
    End,

    /// Drop cron entries for vanished directories
    Patrol,

    /// Show version
    Version,
}

/// Parse arguments and run the selected command
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            print!("{e}");
            return Ok(());
        },
        Err(_) => return Err(Error::Usage(UsageKind::Top)),
    };

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let current_dir = std::env::current_dir()?;
    paths::check_not_banned(&current_dir)?;

    match cli.command {
        Some(Command::Init) => commands::init(),
        Some(Command::Destroy { force }) => commands::destroy(&mut *commands::gate(force)),
        Some(Command::Sweep { modes }) => commands::sweep(&modes),
        Some(Command::Burn { modes, force }) => {
            commands::burn(&modes, &mut *commands::gate(force))
        },
        Some(Command::Config { args }) => commands::config_cmd(&args),
        Some(Command::Ignore { args, force }) => {
            commands::ignore_cmd(&args, &mut *commands::gate(force))
        },
        Some(Command::Start) => commands::start(&current_dir),
        Some(Command::End) => commands::end(&current_dir),
        Some(Command::Patrol) => commands::patrol(),
        Some(Command::Version) => {
            println!("duster v{}", duster::VERSION);
            Ok(())
        },
        None => Err(Error::Usage(UsageKind::Top)),
    }
}
