//! Scheduler registration: `start`, `end`, and the self-healing `patrol`

use std::path::Path;

use duster::config::Config;
use duster::error::Result;
use duster::paths;
use duster::schedule::{self, CronTable};

/// Install this directory's three cron entries (patrol, scheduled sweep,
/// scheduled burn), replacing any it already had.
pub fn start(current_dir: &Path) -> Result<()> {
    paths::check_initialized()?;
    let policy = Config::load()?.policy()?;

    let mut table = CronTable::parse(&schedule::read_crontab()?);
    table.register(current_dir, schedule::managed_lines(current_dir, &policy));
    schedule::write_crontab(&table.render())?;

    println!("Registered \"{}\" with cron", current_dir.display());
    Ok(())
}

/// Remove exactly this directory's cron entries; the rest of the table is
/// untouched byte-for-byte.
pub fn end(current_dir: &Path) -> Result<()> {
    paths::check_initialized()?;

    let mut table = CronTable::parse(&schedule::read_crontab()?);
    if table.unregister(current_dir) == 0 {
        println!("Nothing registered for \"{}\"", current_dir.display());
        return Ok(());
    }
    schedule::write_crontab(&table.render())?;

    println!("Unregistered \"{}\" from cron", current_dir.display());
    Ok(())
}

/// Drop managed entries whose working directory no longer holds a duster
/// state directory. Runs from anywhere; it cleans up after directories that
/// were deleted without `end`.
pub fn patrol() -> Result<()> {
    let mut table = CronTable::parse(&schedule::read_crontab()?);
    let stale = table.prune(paths::is_managed_dir);
    if stale.is_empty() {
        println!("Nothing to clean up");
        return Ok(());
    }
    schedule::write_crontab(&table.render())?;

    for dir in &stale {
        println!("Dropped entries for vanished \"{}\"", dir.display());
    }
    Ok(())
}
