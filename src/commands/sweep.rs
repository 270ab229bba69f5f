//! Quarantine stale entries into today's box

use std::path::Path;

use chrono::Local;

use duster::classify::Classifier;
use duster::config::Config;
use duster::error::{Error, Result, UsageKind};
use duster::ignore::{self, IgnoreList};
use duster::paths;
use duster::warehouse::Warehouse;

/// `sweep [all] [indeed]`
///
/// Reports the maximal dust paths (quoted, one per line); with `indeed` it
/// also moves them into today's dust box. `all` bypasses the age check but
/// not the ignore list.
pub fn sweep(modes: &[String]) -> Result<()> {
    let (all, indeed) = parse_modes(modes)?;
    paths::check_initialized()?;

    let config = Config::load()?;
    let policy = config.policy()?;
    let ignore = IgnoreList::load()?;

    let classifier = if all {
        Classifier::all(&ignore)
    } else {
        Classifier::new(&ignore, policy.sweep_moratorium)
    };
    let result = classifier.classify(Path::new("."));

    for path in &result.dust {
        println!("\"{}\"", ignore::normalize(path));
    }

    let mut failures = result.failures;
    if indeed {
        let warehouse = Warehouse::open();
        let today = Local::now().date_naive();
        failures.extend(warehouse.store(today, Path::new("."), &result.dust)?);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Partial(failures))
    }
}

/// Accepts `[]`, `[all]`, `[indeed]`, or `[all, indeed]`, in that order
fn parse_modes(modes: &[String]) -> Result<(bool, bool)> {
    let words: Vec<&str> = modes.iter().map(String::as_str).collect();
    match words.as_slice() {
        [] => Ok((false, false)),
        ["all"] => Ok((true, false)),
        ["indeed"] => Ok((false, true)),
        ["all", "indeed"] => Ok((true, true)),
        _ => Err(Error::Usage(UsageKind::Sweep)),
    }
}
