//! Centralized path definitions for duster
//!
//! Single source of truth for the on-disk state layout. Everything lives
//! under one state directory in the working tree root:
//!
//! ```text
//! work-tree/
//! └── .duster/
//!     ├── config.toml          # retention policy
//!     ├── ignore               # one excluded path per line
//!     └── warehouse/           # dated quarantine boxes
//!         └── 2026-08-29/
//!             └── dusts/       # moved entries, at their original
//!                 └── ...      # working-tree-relative paths
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the per-tree state directory
pub const STATE_DIR: &str = ".duster";
/// Warehouse directory name, under the state directory
pub const WAREHOUSE_DIR: &str = "warehouse";
/// Config file name, under the state directory
pub const CONFIG_FILE: &str = "config.toml";
/// Ignore file name, under the state directory
pub const IGNORE_FILE: &str = "ignore";
/// Sub-area inside a dated box that holds the moved entries
pub const DUSTS_DIR: &str = "dusts";

/// System directories duster refuses to manage
#[cfg(target_os = "macos")]
pub const BANNED_DIRS: &[&str] = &[
    "/",
    "/Applications",
    "/Library",
    "/Network",
    "/System",
    "/Users",
    "/Volumes",
    "/bin",
    "/cores",
    "/dev",
    "/etc",
    "/home",
    "/opt",
    "/private",
    "/sbin",
    "/tmp",
    "/usr",
    "/var",
];

/// System directories duster refuses to manage
#[cfg(not(target_os = "macos"))]
pub const BANNED_DIRS: &[&str] = &[
    "/",
    "/bin",
    "/boot",
    "/dev",
    "/etc",
    "/home",
    "/lib",
    "/lib64",
    "/media",
    "/mnt",
    "/opt",
    "/proc",
    "/root",
    "/run",
    "/sbin",
    "/srv",
    "/sys",
    "/usr",
    "/var",
];

/// Path to the state directory
#[must_use]
pub fn state_dir() -> PathBuf {
    PathBuf::from(STATE_DIR)
}

/// Path to the warehouse root
#[must_use]
pub fn warehouse_dir() -> PathBuf {
    state_dir().join(WAREHOUSE_DIR)
}

/// Path to the config file
#[must_use]
pub fn config_file() -> PathBuf {
    state_dir().join(CONFIG_FILE)
}

/// Path to the ignore file
#[must_use]
pub fn ignore_file() -> PathBuf {
    state_dir().join(IGNORE_FILE)
}

/// Whether `dir` contains a duster state directory.
///
/// Patrol uses this to decide if a registered working directory is still
/// alive.
#[must_use]
pub fn is_managed_dir(dir: &Path) -> bool {
    dir.join(STATE_DIR).is_dir()
}

/// Refuse to run when the working directory is a protected system path
pub fn check_not_banned(current_dir: &Path) -> Result<()> {
    match BANNED_DIRS.iter().find(|d| Path::new(d) == current_dir) {
        Some(dir) => Err(Error::BannedDirectory((*dir).to_string())),
        None => Ok(()),
    }
}

/// Verify the four essentials exist: state dir, warehouse, config, ignore.
///
/// Every subcommand except `init`, `patrol`, `destroy`, and `version` calls
/// this first.
pub fn check_initialized() -> Result<()> {
    let missing = if !state_dir().is_dir() {
        Some(format!("\"{STATE_DIR}\" directory"))
    } else if !warehouse_dir().is_dir() {
        Some(format!("\"{STATE_DIR}/{WAREHOUSE_DIR}\" directory"))
    } else if !config_file().is_file() {
        Some(format!("\"{STATE_DIR}/{CONFIG_FILE}\" file"))
    } else if !ignore_file().is_file() {
        Some(format!("\"{STATE_DIR}/{IGNORE_FILE}\" file"))
    } else {
        None
    };

    match missing {
        Some(what) => Err(Error::NotInitialized(format!(
            "{what} not found (run \"duster init\" first)"
        ))),
        None => Ok(()),
    }
}
