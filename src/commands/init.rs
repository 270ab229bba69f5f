//! Register the current directory with duster

use std::fs;

use duster::config;
use duster::error::Result;
use duster::ignore::IgnoreList;
use duster::paths;

/// Create the state directory, warehouse, default config, and an ignore
/// file seeded with a snapshot of the current tree.
///
/// Idempotent: pieces that already exist are left alone, so a re-run only
/// fills in what is missing.
pub fn init() -> Result<()> {
    println!("Initializing duster...\n");

    for (path, label) in [
        (paths::state_dir(), format!("\"{}\"", paths::STATE_DIR)),
        (
            paths::warehouse_dir(),
            format!("\"{}/{}\"", paths::STATE_DIR, paths::WAREHOUSE_DIR),
        ),
    ] {
        if path.is_dir() {
            println!("  {label} directory already exists");
        } else {
            fs::create_dir(&path)?;
            println!("  Created {label} directory");
        }
    }

    let config_path = paths::config_file();
    if config::create_default(&config_path)? {
        println!("  Created \"{}/{}\"", paths::STATE_DIR, paths::CONFIG_FILE);
    } else {
        println!(
            "  \"{}/{}\" already exists",
            paths::STATE_DIR,
            paths::CONFIG_FILE
        );
    }

    let ignore_path = paths::ignore_file();
    if ignore_path.is_file() {
        println!(
            "  \"{}/{}\" already exists",
            paths::STATE_DIR,
            paths::IGNORE_FILE
        );
    } else {
        // Seed the ignore list with everything that exists today, so only
        // files created from now on ever become dust candidates.
        let mut list = IgnoreList::empty_at(&ignore_path);
        list.reset_to_snapshot();
        list.save()?;
        println!(
            "  Created \"{}/{}\" ({} existing path(s) excluded)",
            paths::STATE_DIR,
            paths::IGNORE_FILE,
            list.len()
        );
    }

    println!("\nduster initialized. Run \"duster start\" to schedule sweeps.");
    Ok(())
}
