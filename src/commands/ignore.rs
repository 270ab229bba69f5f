//! Manage the ignore list

use std::path::Path;

use duster::confirm::Confirm;
use duster::error::{Error, Result, UsageKind};
use duster::ignore::IgnoreList;
use duster::paths;

/// `ignore <add|remove|current|clear> [path ...]`
///
/// `add` and `remove` take one or more paths; `current` replaces the list
/// with a snapshot of the live tree and `clear` empties it, both behind the
/// confirmation gate.
pub fn ignore_cmd(args: &[String], gate: &mut dyn Confirm) -> Result<()> {
    paths::check_initialized()?;

    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["add", paths @ ..] if !paths.is_empty() => add(paths),
        ["remove", paths @ ..] if !paths.is_empty() => remove(paths),
        ["current"] => current(gate),
        ["clear"] => clear(gate),
        _ => Err(Error::Usage(UsageKind::Ignore)),
    }
}

fn add(paths: &[&str]) -> Result<()> {
    let mut list = IgnoreList::load()?;
    for path in paths {
        if list.add(Path::new(path)) {
            println!("Ignoring \"{path}\"");
        } else {
            println!("Skipped \"{path}\" (does not exist)");
        }
    }
    list.save()
}

fn remove(paths: &[&str]) -> Result<()> {
    let mut list = IgnoreList::load()?;
    for path in paths {
        if list.remove(Path::new(path)) {
            println!("No longer ignoring \"{path}\"");
        }
    }
    list.save()
}

fn current(gate: &mut dyn Confirm) -> Result<()> {
    if !gate.confirm("Replace the ignore list with the current tree?")? {
        println!("Canceled");
        return Ok(());
    }
    let mut list = IgnoreList::load()?;
    list.reset_to_snapshot();
    list.save()?;
    println!("Ignore list now mirrors the current tree ({} path(s))", list.len());
    Ok(())
}

fn clear(gate: &mut dyn Confirm) -> Result<()> {
    if !gate.confirm("Remove every entry from the ignore list?")? {
        println!("Canceled");
        return Ok(());
    }
    let mut list = IgnoreList::load()?;
    list.clear();
    list.save()?;
    println!("Ignore list cleared");
    Ok(())
}
