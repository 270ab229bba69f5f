//! The ignore list: paths excluded from dust classification
//!
//! Stored at `.duster/ignore` as one `./`-prefixed relative path per line,
//! kept sorted. The engine only consumes [`IgnoreList::is_ignored`]; the
//! add/remove/current/clear surface exists for the `ignore` subcommand.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::paths;

/// An externally maintained set of excluded paths
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: BTreeSet<String>,
    path: PathBuf,
}

/// Normalize a user-supplied path to the stored `./a/b` form.
///
/// Trailing separators are dropped so `dir/` and `dir` are the same entry.
#[must_use]
pub fn normalize(path: &Path) -> String {
    let mut joined = String::from(".");
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {},
            other => {
                joined.push('/');
                joined.push_str(&other.as_os_str().to_string_lossy());
            },
        }
    }
    joined
}

impl IgnoreList {
    /// Load the list from `.duster/ignore`
    pub fn load() -> Result<Self> {
        Self::load_from(paths::ignore_file())
    }

    /// Load the list from an explicit path
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = fs::read_to_string(&path)?;
        let entries = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect();
        Ok(Self { entries, path })
    }

    /// An empty list persisted at `path`
    #[must_use]
    pub fn empty_at(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: BTreeSet::new(),
            path: path.into(),
        }
    }

    /// A list that only lives in memory; `save` is not meant to be called.
    ///
    /// Entries are normalized, so plain `dir1/file2` works. Useful as the
    /// in-memory fake behind the classifier in tests.
    #[must_use]
    pub fn in_memory<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| normalize(Path::new(e.as_ref())))
                .collect(),
            path: PathBuf::new(),
        }
    }

    /// Write the list back, one path per line
    pub fn save(&self) -> Result<()> {
        let mut contents = String::new();
        for entry in &self.entries {
            contents.push_str(entry);
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Membership test the classifier consumes.
    ///
    /// A path is ignored when it or any of its ancestors is listed, so
    /// ignoring a directory shields its whole subtree.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let normalized = normalize(path);
        if self.entries.contains(&normalized) {
            return true;
        }
        self.entries
            .iter()
            .any(|entry| normalized.starts_with(&format!("{entry}/")))
    }

    /// Add `path` if it exists on disk; returns whether it was added
    pub fn add(&mut self, path: &Path) -> bool {
        // Strip a trailing slash by normalizing before the existence check.
        let normalized = normalize(path);
        if !Path::new(&normalized).exists() {
            return false;
        }
        self.entries.insert(normalized)
    }

    /// Remove `path`; returns whether it was present
    pub fn remove(&mut self, path: &Path) -> bool {
        self.entries.remove(&normalize(path))
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the entries with a snapshot of the live tree
    pub fn reset_to_snapshot(&mut self) {
        self.entries = snapshot(Path::new("."));
    }

    /// Current entries, sorted
    #[must_use]
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every file under `root`, as normalized relative paths, excluding the
/// state directory. `init` seeds the ignore file with this so only files
/// created after initialization ever become dust candidates.
#[must_use]
pub fn snapshot(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name().to_str() != Some(paths::STATE_DIR))
        .filter_map(std::result::Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .map(|e| normalize(e.path().strip_prefix(root).unwrap_or_else(|_| e.path())))
        .collect()
}
