//! The warehouse: dated quarantine boxes and their retention
//!
//! A box is a directory under the warehouse root named `YYYY-MM-DD`; entries
//! quarantined that day live under its `dusts/` sub-area at the same
//! relative path they held in the working tree. Sweep fills today's box,
//! burn deletes boxes whose date has aged past the burn moratorium. Anything
//! in the warehouse that does not parse as a date is left alone.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{EntryFailure, Result};
use crate::paths;

/// Box-name date format
const BOX_DATE_FORMAT: &str = "%Y-%m-%d";

/// Handle on the warehouse root
#[derive(Debug, Clone)]
pub struct Warehouse {
    root: PathBuf,
}

impl Warehouse {
    /// The warehouse of the current working tree
    #[must_use]
    pub fn open() -> Self {
        Self {
            root: paths::warehouse_dir(),
        }
    }

    /// A warehouse rooted at an explicit path
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The box directory for `date`
    #[must_use]
    pub fn box_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date.format(BOX_DATE_FORMAT).to_string())
    }

    /// The `dusts/` area inside the box for `date`
    #[must_use]
    pub fn dust_box(&self, date: NaiveDate) -> PathBuf {
        self.box_path(date).join(paths::DUSTS_DIR)
    }

    /// Move `candidates` (working-tree-relative paths) from `work_root` into
    /// the dust box for `date`, creating the box if needed.
    ///
    /// Each candidate is independent: a failed move is recorded and the rest
    /// still move. A source that vanished underneath us (a racing sweeper)
    /// is a tolerated no-op, not a failure.
    pub fn store(
        &self,
        date: NaiveDate,
        work_root: &Path,
        candidates: &[PathBuf],
    ) -> Result<Vec<EntryFailure>> {
        let dust_box = self.dust_box(date);
        fs::create_dir_all(&dust_box)?;

        let mut failures = Vec::new();
        for rel in candidates {
            let source = work_root.join(rel);
            let dest = dust_box.join(rel);

            let moved = dest
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| fs::rename(&source, &dest));
            match moved {
                Ok(()) => log::info!("moved \"{}\" into the dust box", rel.display()),
                Err(e) if e.kind() == ErrorKind::NotFound && !source.exists() => {
                    log::info!("\"{}\" vanished before the move; skipped", rel.display());
                },
                Err(cause) => failures.push(EntryFailure {
                    path: rel.clone(),
                    cause,
                }),
            }
        }
        Ok(failures)
    }

    /// Boxes whose date is at least `moratorium_days` old, sorted by name.
    ///
    /// A box dated exactly `moratorium_days` ago is expired; one day younger
    /// is retained.
    pub fn expired_boxes(&self, today: NaiveDate, moratorium_days: i64) -> Result<Vec<PathBuf>> {
        let mut expired = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Ok(date) = NaiveDate::parse_from_str(name, BOX_DATE_FORMAT) else {
                continue;
            };
            if (today - date).num_days() >= moratorium_days {
                expired.push(entry.path());
            }
        }
        expired.sort();
        Ok(expired)
    }

    /// Delete each expired box tree; per-box failures are collected, an
    /// already-absent box counts as done
    #[must_use]
    pub fn burn(&self, boxes: &[PathBuf]) -> Vec<EntryFailure> {
        let mut failures = Vec::new();
        for path in boxes {
            match fs::remove_dir_all(path) {
                Ok(()) => log::info!("burned \"{}\"", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {},
                Err(cause) => failures.push(EntryFailure {
                    path: path.clone(),
                    cause,
                }),
            }
        }
        failures
    }
}
