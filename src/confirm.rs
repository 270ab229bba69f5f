//! The confirmation gate for destructive operations
//!
//! Destructive commands never touch a terminal directly; they ask a
//! [`Confirm`] implementation. A refusal (anything but a literal `yes`,
//! including EOF) is a clean no-op, not an error.

use std::io::{self, BufRead, Write};

/// Synchronous yes/no gate
pub trait Confirm {
    /// Ask the operator; `true` means proceed
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Reads one line from stdin; only a literal `yes` confirms
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        print!("{prompt} [yes/no]: ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim() == "yes")
    }
}

/// Always proceeds; used by `--force` and scheduled runs
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}
