//! Dust classification: which entries are stale enough to quarantine
//!
//! An explicit depth-first post-order walk over the live working tree.
//! Files are dust when they are not ignored and their age exceeds the sweep
//! moratorium (or unconditionally in "all" mode); a directory is dust only
//! when it is non-empty and every child is dust. The walk reports *maximal*
//! dust nodes: once a directory is dust, its contents move with it and are
//! not listed separately.
//!
//! Staleness is measured from the last **access** time, so a file that is
//! read but never written stays fresh.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::error::EntryFailure;
use crate::ignore::IgnoreList;
use crate::paths;

/// Per-node verdict under the bottom-up rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Dust,
    NotDust,
}

/// Outcome of one classification pass
#[derive(Debug, Default)]
pub struct Classification {
    /// Maximal dust paths relative to the walked root, in traversal order
    pub dust: Vec<PathBuf>,
    /// Entries that could not be inspected; the walk continued without them
    pub failures: Vec<EntryFailure>,
}

/// Classifies the working tree under the current policy
#[derive(Debug)]
pub struct Classifier<'a> {
    ignore: &'a IgnoreList,
    moratorium: Duration,
    sweep_all: bool,
    now: SystemTime,
}

impl<'a> Classifier<'a> {
    /// Classifier for a normal sweep: age must exceed `moratorium`
    #[must_use]
    pub fn new(ignore: &'a IgnoreList, moratorium: chrono::Duration) -> Self {
        Self {
            ignore,
            moratorium: moratorium.to_std().unwrap_or_default(),
            sweep_all: false,
            now: SystemTime::now(),
        }
    }

    /// Classifier for `sweep all`: the age check is bypassed, the ignore
    /// check is not
    #[must_use]
    pub fn all(ignore: &'a IgnoreList) -> Self {
        Self {
            ignore,
            moratorium: Duration::ZERO,
            sweep_all: true,
            now: SystemTime::now(),
        }
    }

    /// Walk the tree rooted at `root` (the working tree, usually `.`).
    ///
    /// The root itself is never a candidate; its dust children are the
    /// top-level maximal nodes. The state directory is excluded from the
    /// walk entirely. Reported paths and the ignore predicate both use
    /// root-relative paths.
    #[must_use]
    pub fn classify(&self, root: &Path) -> Classification {
        let mut result = Classification::default();
        let walk = Walk {
            classifier: self,
            root,
        };

        let children = match walk.read_sorted(Path::new(""), &mut result) {
            Some(children) => children,
            None => return result,
        };
        for child in children {
            if child.as_os_str() == paths::STATE_DIR {
                continue;
            }
            if walk.visit(&child, &mut result) == Verdict::Dust {
                result.dust.push(child);
            }
        }
        result
    }
}

/// One classification pass bound to a concrete root
struct Walk<'a, 'b> {
    classifier: &'b Classifier<'a>,
    root: &'b Path,
}

impl Walk<'_, '_> {
    fn visit(&self, rel: &Path, result: &mut Classification) -> Verdict {
        if self.classifier.ignore.is_ignored(rel) {
            log::debug!("ignored: {}", rel.display());
            return Verdict::NotDust;
        }

        let metadata = match fs::symlink_metadata(self.root.join(rel)) {
            Ok(m) => m,
            Err(cause) => {
                result.failures.push(EntryFailure {
                    path: rel.to_path_buf(),
                    cause,
                });
                return Verdict::NotDust;
            },
        };

        if metadata.is_dir() {
            self.visit_dir(rel, result)
        } else if self.is_stale(rel, &metadata, result) {
            Verdict::Dust
        } else {
            Verdict::NotDust
        }
    }

    fn visit_dir(&self, rel: &Path, result: &mut Classification) -> Verdict {
        let children = match self.read_sorted(rel, result) {
            Some(children) => children,
            None => return Verdict::NotDust,
        };

        // Empty directories are never dust; only directories that *became*
        // all-dust are candidates.
        if children.is_empty() {
            return Verdict::NotDust;
        }

        // Dust children are pushed as they are met, so their report lines
        // interleave with deeper maximal nodes in traversal order. A dust
        // subtree pushes nothing of its own, so rolling back to `mark` when
        // every child turned out dust leaves only this directory's verdict.
        let mark = result.dust.len();
        let mut all_dust = true;
        for child in children {
            if self.visit(&child, result) == Verdict::Dust {
                result.dust.push(child);
            } else {
                all_dust = false;
            }
        }

        if all_dust {
            result.dust.truncate(mark);
            return Verdict::Dust;
        }
        Verdict::NotDust
    }

    fn is_stale(&self, rel: &Path, metadata: &fs::Metadata, result: &mut Classification) -> bool {
        if self.classifier.sweep_all {
            return true;
        }
        let accessed = match metadata.accessed() {
            Ok(t) => t,
            Err(cause) => {
                result.failures.push(EntryFailure {
                    path: rel.to_path_buf(),
                    cause,
                });
                return false;
            },
        };
        match self.classifier.now.duration_since(accessed) {
            Ok(age) => age > self.classifier.moratorium,
            // Accessed in the future (clock skew): treat as fresh.
            Err(_) => false,
        }
    }

    /// Root-relative children of `rel` sorted by name; `None` records a
    /// failure for the directory itself
    fn read_sorted(&self, rel: &Path, result: &mut Classification) -> Option<Vec<PathBuf>> {
        let entries = match fs::read_dir(self.root.join(rel)) {
            Ok(entries) => entries,
            Err(cause) => {
                result.failures.push(EntryFailure {
                    path: rel.to_path_buf(),
                    cause,
                });
                return None;
            },
        };
        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(rel.join(entry.file_name())),
                Err(cause) => {
                    result.failures.push(EntryFailure {
                        path: rel.to_path_buf(),
                        cause,
                    });
                    None
                },
            })
            .collect();
        children.sort();
        Some(children)
    }
}
