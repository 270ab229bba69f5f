//! Command implementations, one module per subcommand

mod burn;
mod config;
mod cron;
mod destroy;
mod ignore;
mod init;
mod sweep;

pub use burn::burn;
pub use config::config_cmd;
pub use cron::{end, patrol, start};
pub use destroy::destroy;
pub use ignore::ignore_cmd;
pub use init::init;
pub use sweep::sweep;

use duster::confirm::{AssumeYes, Confirm, StdinConfirm};

/// The confirmation gate for this invocation: `--force` assumes yes,
/// otherwise one line is read from stdin
pub fn gate(force: bool) -> Box<dyn Confirm> {
    if force {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    }
}
