//! Scheduler registration: a managed block in the user's crontab
//!
//! duster owns a marker-delimited block inside the crontab; everything
//! outside the block is preserved byte-for-byte. Each managed line is
//! `<cron spec>\tcd <dir> && duster <subcommand>`, so a line is keyed by its
//! working directory and subcommand. The text manipulation is pure
//! ([`CronTable`]) and unit-testable; only [`read_crontab`] /
//! [`write_crontab`] talk to the `crontab` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::policy::{Period, Policy};

/// First line of the managed block
pub const BLOCK_START: &str = "# --- duster managed block; do not edit ---";
/// Last line of the managed block
pub const BLOCK_END: &str = "# --- end duster managed block ---";

/// Cron spec for the self-healing patrol pass: start of every day,
/// independent of policy
const PATROL_SPEC: &str = "0 0 * * *";

/// The managed lines `start` installs for `dir` under `policy`
#[must_use]
pub fn managed_lines(dir: &Path, policy: &Policy) -> Vec<String> {
    let dir = dir.display();
    let spec = match policy.sweep_period {
        Period::Daily => format!(
            "{} {} * * *",
            policy.sweep_time.minute, policy.sweep_time.hour
        ),
        Period::Weekly => format!(
            "{} {} * * 0",
            policy.sweep_time.minute, policy.sweep_time.hour
        ),
    };
    vec![
        format!("{PATROL_SPEC}\tcd {dir} && duster patrol"),
        format!("{spec}\tcd {dir} && duster sweep indeed"),
        // --force: scheduled burns must not block on the confirmation gate.
        format!("{spec}\tcd {dir} && duster burn indeed --force"),
    ]
}

/// A crontab split around the managed block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronTable {
    upper: String,
    ours: Vec<String>,
    lower: String,
}

fn line_needle(dir: &Path) -> String {
    format!("cd {} && duster ", dir.display())
}

impl CronTable {
    /// Split `contents` at the block markers.
    ///
    /// Without markers the whole text is `upper` and the block is empty.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let start = format!("{BLOCK_START}\n");
        let end = format!("{BLOCK_END}\n");

        let Some(start_at) = contents.find(&start) else {
            return Self {
                upper: contents.to_string(),
                ours: Vec::new(),
                lower: String::new(),
            };
        };
        let after_start = start_at + start.len();
        let Some(end_off) = contents[after_start..].find(&end) else {
            return Self {
                upper: contents.to_string(),
                ours: Vec::new(),
                lower: String::new(),
            };
        };
        let end_at = after_start + end_off;

        Self {
            upper: contents[..start_at].to_string(),
            ours: contents[after_start..end_at]
                .lines()
                .map(ToString::to_string)
                .collect(),
            lower: contents[end_at + end.len()..].to_string(),
        }
    }

    /// Reassemble the crontab text.
    ///
    /// An empty block is omitted entirely, so unregistering the last
    /// directory restores the pre-registration bytes.
    #[must_use]
    pub fn render(&self) -> String {
        if self.ours.is_empty() {
            return format!("{}{}", self.upper, self.lower);
        }
        let mut out = self.upper.clone();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(BLOCK_START);
        out.push('\n');
        for line in &self.ours {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(BLOCK_END);
        out.push('\n');
        out.push_str(&self.lower);
        out
    }

    /// Install `lines` for `dir`, replacing any lines it already had.
    ///
    /// Replacement (rather than rejection) keeps repeated `start` calls
    /// idempotent and lets a policy change refresh the schedule.
    pub fn register(&mut self, dir: &Path, lines: Vec<String>) {
        self.unregister(dir);
        self.ours.extend(lines);
    }

    /// Remove every managed line for `dir`; returns how many were dropped
    pub fn unregister(&mut self, dir: &Path) -> usize {
        let needle = line_needle(dir);
        let before = self.ours.len();
        self.ours.retain(|line| !line.contains(&needle));
        before - self.ours.len()
    }

    /// Working directories that currently have managed lines
    #[must_use]
    pub fn managed_dirs(&self) -> Vec<PathBuf> {
        static LINE: OnceLock<Regex> = OnceLock::new();
        let line_re = LINE
            .get_or_init(|| Regex::new(r"\tcd (?P<dir>.+?) && duster ").expect("valid regex"));

        let mut dirs: Vec<PathBuf> = self
            .ours
            .iter()
            .filter_map(|line| line_re.captures(line))
            .map(|caps| PathBuf::from(&caps["dir"]))
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    /// Drop lines whose working directory no longer passes `valid`;
    /// returns the directories that were cleaned out
    pub fn prune(&mut self, valid: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
        let stale: Vec<PathBuf> = self
            .managed_dirs()
            .into_iter()
            .filter(|dir| !valid(dir))
            .collect();
        for dir in &stale {
            self.unregister(dir);
        }
        stale
    }

    /// Whether the block has any lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ours.is_empty()
    }
}

/// Current crontab contents; a missing crontab reads as empty
pub fn read_crontab() -> Result<String> {
    let output = Command::new("crontab")
        .arg("-l")
        .output()
        .map_err(|e| Error::Schedule(format!("cannot run \"crontab -l\": {e}")))?;

    if output.status.success() {
        String::from_utf8(output.stdout)
            .map_err(|_| Error::Schedule("crontab contents are not valid UTF-8".to_string()))
    } else {
        // "no crontab for <user>" exits non-zero; start from scratch.
        Ok(String::new())
    }
}

/// Replace the crontab with `contents` via `crontab -`
pub fn write_crontab(contents: &str) -> Result<()> {
    let mut child = Command::new("crontab")
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Schedule(format!("cannot run \"crontab -\": {e}")))?;

    child
        .stdin
        .take()
        .ok_or_else(|| Error::Schedule("crontab stdin unavailable".to_string()))?
        .write_all(contents.as_bytes())
        .map_err(|e| Error::Schedule(format!("cannot write crontab: {e}")))?;

    let status = child
        .wait()
        .map_err(|e| Error::Schedule(format!("cannot wait for crontab: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Schedule("crontab rejected the new table".to_string()))
    }
}
