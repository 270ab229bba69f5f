//! Expire old quarantine boxes

use chrono::Local;

use duster::confirm::Confirm;
use duster::config::Config;
use duster::error::{Error, Result, UsageKind};
use duster::paths;
use duster::warehouse::Warehouse;

/// `burn [indeed]`
///
/// Reports warehouse boxes whose date is at least the burn moratorium old
/// (quoted, one per line); with `indeed` it deletes them after the gate
/// confirms. Scheduled runs pass `--force` so the gate never blocks.
pub fn burn(modes: &[String], gate: &mut dyn Confirm) -> Result<()> {
    let indeed = parse_modes(modes)?;
    paths::check_initialized()?;

    let policy = Config::load()?.policy()?;
    let warehouse = Warehouse::open();
    let today = Local::now().date_naive();

    let expired = warehouse.expired_boxes(today, policy.burn_moratorium_days)?;
    for path in &expired {
        println!("\"{}\"", path.display());
    }

    if !indeed || expired.is_empty() {
        return Ok(());
    }

    let prompt = format!("Permanently delete {} expired box(es)?", expired.len());
    if !gate.confirm(&prompt)? {
        println!("Canceled");
        return Ok(());
    }

    let failures = warehouse.burn(&expired);
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Partial(failures))
    }
}

/// Accepts `[]` or `[indeed]`
fn parse_modes(modes: &[String]) -> Result<bool> {
    let words: Vec<&str> = modes.iter().map(String::as_str).collect();
    match words.as_slice() {
        [] => Ok(false),
        ["indeed"] => Ok(true),
        _ => Err(Error::Usage(UsageKind::Burn)),
    }
}
