//! Error taxonomy for the retention engine
//!
//! Four failure classes with distinct reporting behavior:
//! usage errors render a `Usage:` block, validation errors render an
//! `ERROR:` line, partial failures enumerate the entries that could not be
//! processed (after processing the rest), and IO/schedule errors abort the
//! invocation. Other tooling parses the `Usage:` and `ERROR:` prefixes, so
//! they are part of the external contract.

use std::path::PathBuf;

use thiserror::Error;

/// Which subcommand's usage text to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    /// Top-level usage (unknown or missing subcommand)
    Top,
    /// `sweep [all] [indeed]`
    Sweep,
    /// `burn [indeed]`
    Burn,
    /// `config [set <key> <value>]`
    Config,
    /// `ignore <add|remove|current|clear> [path ...]`
    Ignore,
}

impl UsageKind {
    /// The `Usage:`-prefixed help block for this kind
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Top => {
                "Usage: duster <command> [...]\n\
                 \n\
                 Commands:\n\
                 \x20   init     Register the current directory\n\
                 \x20   destroy  Delete all duster state for this directory\n\
                 \x20   sweep    Quarantine stale entries (report unless \"indeed\")\n\
                 \x20   burn     Expire old quarantine boxes (report unless \"indeed\")\n\
                 \x20   config   Show or set retention policy\n\
                 \x20   ignore   Manage the ignore list\n\
                 \x20   start    Register scheduled sweep/burn with cron\n\
                 \x20   end      Unregister from cron\n\
                 \x20   patrol   Drop cron entries for vanished directories\n\
                 \x20   version  Show version"
            },
            Self::Sweep => "Usage: duster sweep [all] [indeed]",
            Self::Burn => "Usage: duster burn [indeed]",
            Self::Config => "Usage: duster config [set <key> <value>]",
            Self::Ignore => "Usage: duster ignore <add|remove|current|clear> [path ...]",
        }
    }
}

/// One filesystem entry that could not be classified or moved
#[derive(Debug)]
pub struct EntryFailure {
    /// The entry's path relative to the working root
    pub path: PathBuf,
    /// What went wrong
    pub cause: std::io::Error,
}

impl std::fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\": {}", self.path.display(), self.cause)
    }
}

fn entry_word(failures: &[EntryFailure]) -> &'static str {
    if failures.len() == 1 { "entry" } else { "entries" }
}

/// Errors surfaced by the engine and the CLI layer
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed invocation (missing/extra/unknown arguments)
    #[error("{}", .0.text())]
    Usage(UsageKind),

    /// Well-formed but policy-violating value
    #[error("ERROR: {0}")]
    Validation(String),

    /// Required state is missing (run `duster init` first)
    #[error("ERROR: {0}")]
    NotInitialized(String),

    /// Refusal to operate in a protected system directory
    #[error("ERROR: cannot run in \"{0}\"")]
    BannedDirectory(String),

    /// Some entries failed; the rest were still processed
    #[error("ERROR: {} {} could not be processed", .0.len(), entry_word(.0))]
    Partial(Vec<EntryFailure>),

    /// The external job table could not be read or written
    #[error("ERROR: crontab: {0}")]
    Schedule(String),

    /// Filesystem-level failure that aborts the invocation
    #[error("ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Process exit code for this error class
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Engine-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
