//! Integration tests for the duster CLI
//!
//! These tests run the real binary against throwaway working trees,
//! checking the stdout contract (`Usage:` / `ERROR:` markers, quoted
//! paths) and exit codes. Nothing here touches the user's crontab.

// Include lifecycle tests from the same directory
mod lifecycle_test;

use std::fs::{self, File};
use std::path::Path;

use assert_cmd::cargo;
use filetime::FileTime;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a duster command
fn duster() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("duster"))
}

/// Create a file (with parents) under `root`
fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap();
}

/// Push a file's access and modification times into the past
fn backdate(root: &Path, rel: &str, seconds_ago: i64) {
    let then = FileTime::from_unix_time(FileTime::now().unix_seconds() - seconds_ago, 0);
    filetime::set_file_times(root.join(rel), then, then).unwrap();
}

const HOUR: i64 = 3600;

// =============================================================================
// USAGE CONTRACT
// =============================================================================

#[test]
fn test_no_arguments_renders_top_level_usage() {
    let temp = TempDir::new().unwrap();

    duster()
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Usage: duster"));
}

#[test]
fn test_unknown_subcommand_renders_top_level_usage() {
    let temp = TempDir::new().unwrap();

    duster()
        .arg("frobnicate")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Usage: duster"));
}

#[test]
fn test_bad_sweep_mode_word_renders_sweep_usage() {
    let temp = TempDir::new().unwrap();

    duster()
        .args(["sweep", "deed"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Usage: duster sweep"));
}

#[test]
fn test_sweep_before_init_is_an_error() {
    let temp = TempDir::new().unwrap();

    duster()
        .arg("sweep")
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("ERROR:"))
        .stdout(predicate::str::contains("duster init"));
}

#[test]
fn test_version_prints_the_crate_version() {
    let temp = TempDir::new().unwrap();

    duster()
        .arg("version")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("duster v"));
}

// =============================================================================
// INIT
// =============================================================================

#[test]
fn test_init_creates_the_state_layout() {
    let temp = TempDir::new().unwrap();

    duster()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created \".duster\" directory"));

    assert!(temp.path().join(".duster").is_dir());
    assert!(temp.path().join(".duster/warehouse").is_dir());
    assert!(temp.path().join(".duster/config.toml").is_file());
    assert!(temp.path().join(".duster/ignore").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let temp = TempDir::new().unwrap();

    duster().arg("init").current_dir(temp.path()).assert().success();
    duster()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_init_excludes_preexisting_files_from_sweeps() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "was-here-first.txt");

    duster().arg("init").current_dir(temp.path()).assert().success();

    // Even "sweep all" leaves the seeded snapshot alone.
    duster()
        .args(["sweep", "all"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// SWEEP
// =============================================================================

#[test]
fn test_sweep_reports_only_maximal_dust_nodes() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    touch(temp.path(), "file1");
    touch(temp.path(), "dir1/file2");
    touch(temp.path(), "dir1/dir2/file5");
    touch(temp.path(), "dir1/dir2/dir3/file3");
    touch(temp.path(), "dir1/dir2/dir3/file4");
    backdate(temp.path(), "dir1/dir2/dir3/file3", HOUR);
    backdate(temp.path(), "dir1/dir2/dir3/file4", HOUR);

    // Only the deepest all-stale directory is reported; fresh siblings keep
    // its ancestors alive.
    duster()
        .arg("sweep")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::eq("\"./dir1/dir2/dir3\"\n"));

    // A report-only sweep moves nothing.
    assert!(temp.path().join("dir1/dir2/dir3/file3").exists());
}

#[test]
fn test_sweep_indeed_moves_dust_into_a_dated_box() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    touch(temp.path(), "old/report.txt");
    backdate(temp.path(), "old/report.txt", HOUR);
    backdate(temp.path(), "old", HOUR);

    duster()
        .args(["sweep", "indeed"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./old\""));

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let boxed = temp
        .path()
        .join(".duster/warehouse")
        .join(&today)
        .join("dusts/old/report.txt");
    assert!(boxed.is_file());
    assert!(!temp.path().join("old").exists());

    // Nothing left for a second pass.
    duster()
        .args(["sweep", "indeed"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_sweep_respects_the_ignore_list() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    touch(temp.path(), "keep/notes.md");
    backdate(temp.path(), "keep/notes.md", HOUR);

    duster()
        .args(["ignore", "add", "keep"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring \"keep\""));

    duster()
        .arg("sweep")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_sweep_enumerates_unreadable_entries_and_exits_nonzero() {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    touch(temp.path(), "locked/inner");
    touch(temp.path(), "stale");
    backdate(temp.path(), "stale", HOUR);

    let locked = temp.path().join("locked");
    fs::set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Permission bits are not enforced for this user (e.g. root).
        fs::set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();
        return;
    }

    // The sibling is still reported; the unreadable entry gets its own
    // ERROR: line plus the summary, and the run exits non-zero.
    duster()
        .arg("sweep")
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"./stale\""))
        .stdout(predicate::str::contains("ERROR: \"locked\""))
        .stdout(predicate::str::contains("ERROR: 1 entry could not be processed"));

    fs::set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_prints_the_default_policy() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    duster()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("burn.moratorium = \"2 weeks\""))
        .stdout(predicate::str::contains("sweep.moratorium = \"10 minutes\""))
        .stdout(predicate::str::contains("sweep.period = \"daily\""))
        .stdout(predicate::str::contains("sweep.time = \"00:00\""));
}

#[test]
fn test_config_set_persists_a_canonical_value() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    duster()
        .args(["config", "set", "sweep.moratorium", "1 hour"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sweep.moratorium = \"1 hour\""));

    duster()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sweep.moratorium = \"1 hour\""));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    duster()
        .args(["config", "set", "sweep.period", "hourly"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("ERROR:"));

    // The stored value is unchanged.
    duster()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sweep.period = \"daily\""));
}

#[test]
fn test_config_set_without_a_value_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    duster()
        .args(["config", "set", "sweep.time"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Usage: duster config"));
}

// =============================================================================
// IGNORE
// =============================================================================

#[test]
fn test_ignore_add_then_remove_round_trips() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();
    touch(temp.path(), "precious.txt");

    duster()
        .args(["ignore", "add", "precious.txt"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring \"precious.txt\""));

    duster()
        .args(["ignore", "remove", "precious.txt"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No longer ignoring \"precious.txt\""));
}

#[test]
fn test_ignore_add_reports_nonexistent_paths_as_skipped() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();
    touch(temp.path(), "real.txt");

    duster()
        .args(["ignore", "add", "missing.txt", "real.txt"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped \"missing.txt\" (does not exist)"))
        .stdout(predicate::str::contains("Ignoring \"real.txt\""));

    let ignore = fs::read_to_string(temp.path().join(".duster/ignore")).unwrap();
    assert!(ignore.contains("./real.txt"));
    assert!(!ignore.contains("missing.txt"));
}

#[test]
fn test_ignore_without_an_action_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    duster().arg("init").current_dir(temp.path()).assert().success();

    duster()
        .arg("ignore")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Usage: duster ignore"));
}

#[test]
fn test_ignore_clear_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "seeded.txt");
    duster().arg("init").current_dir(temp.path()).assert().success();

    duster()
        .args(["ignore", "clear"])
        .current_dir(temp.path())
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canceled"));

    // The seeded snapshot is still there.
    let ignore = fs::read_to_string(temp.path().join(".duster/ignore")).unwrap();
    assert!(ignore.contains("./seeded.txt"));

    duster()
        .args(["ignore", "clear"])
        .current_dir(temp.path())
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignore list cleared"));
    assert_eq!(fs::read_to_string(temp.path().join(".duster/ignore")).unwrap(), "");
}
