//! Integration tests for the full quarantine lifecycle
//!
//! sweep fills a dated box, time passes, burn expires it, destroy wipes
//! the state. Boxes are aged by creating them under back-dated names
//! instead of waiting out the moratorium.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use chrono::{Duration, Local};
use predicates::prelude::*;
use tempfile::TempDir;

fn duster() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("duster"))
}

/// Create a warehouse box dated `days_ago` containing one quarantined file
fn plant_box(root: &Path, days_ago: i64) -> String {
    let date = (Local::now().date_naive() - Duration::days(days_ago))
        .format("%Y-%m-%d")
        .to_string();
    let dusts = root.join(".duster/warehouse").join(&date).join("dusts");
    fs::create_dir_all(&dusts).unwrap();
    fs::write(dusts.join("stale.txt"), "stale").unwrap();
    date
}

#[test]
fn test_burn_expires_boxes_at_the_moratorium_boundary() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    // Default burn moratorium is 2 weeks: a 14-day-old box is expired,
    // a 13-day-old box is retained.
    let expired = plant_box(temp.path(), 14);
    let retained = plant_box(temp.path(), 13);

    duster()
        .arg("burn")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(&expired))
        .stdout(predicate::str::contains(&retained).not());

    // The report alone deletes nothing.
    assert!(temp.path().join(".duster/warehouse").join(&expired).exists());

    duster()
        .args(["burn", "indeed", "--force"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(!temp.path().join(".duster/warehouse").join(&expired).exists());
    assert!(temp.path().join(".duster/warehouse").join(&retained).exists());
}

#[test]
fn test_burn_indeed_honors_a_refused_prompt() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();
    let expired = plant_box(temp.path(), 20);

    duster()
        .args(["burn", "indeed"])
        .current_dir(temp.path())
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canceled"));
    assert!(temp.path().join(".duster/warehouse").join(&expired).exists());

    duster()
        .args(["burn", "indeed"])
        .current_dir(temp.path())
        .write_stdin("yes\n")
        .assert()
        .success();
    assert!(!temp.path().join(".duster/warehouse").join(&expired).exists());
}

#[test]
fn test_burn_skips_names_that_are_not_dates() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    fs::create_dir_all(temp.path().join(".duster/warehouse/notes")).unwrap();

    duster()
        .args(["burn", "indeed", "--force"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(temp.path().join(".duster/warehouse/notes").exists());
}

#[test]
fn test_full_cycle_from_init_to_destroy() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    // Fresh files only become dust under "all"; the ignore list still wins.
    fs::write(temp.path().join("scratch.log"), "x").unwrap();
    fs::create_dir(temp.path().join("keep")).unwrap();
    fs::write(temp.path().join("keep/notes.md"), "x").unwrap();
    duster()
        .args(["ignore", "add", "keep"])
        .current_dir(temp.path())
        .assert()
        .success();

    duster()
        .args(["sweep", "all", "indeed"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./scratch.log\""));
    assert!(!temp.path().join("scratch.log").exists());
    assert!(temp.path().join("keep/notes.md").exists());

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let boxed = temp
        .path()
        .join(".duster/warehouse")
        .join(&today)
        .join("dusts/scratch.log");
    assert!(boxed.is_file());

    // Today's box is far inside the moratorium, so burn reports nothing.
    duster()
        .arg("burn")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    // A refused destroy leaves everything in place.
    duster()
        .arg("destroy")
        .current_dir(temp.path())
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canceled"));
    assert!(temp.path().join(".duster").exists());

    duster()
        .arg("destroy")
        .current_dir(temp.path())
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed \".duster\""));
    assert!(!temp.path().join(".duster").exists());
    assert!(temp.path().join("keep/notes.md").exists());
}

#[test]
fn test_destroy_without_state_is_a_no_op() {
    let temp = TempDir::new().unwrap();

    duster()
        .arg("destroy")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to destroy"));
}
