use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};

use super::documents::Document;
use super::files::File;

/// Per-path relationship between live content and the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyStatus {
    InSync,
    Modified,
    /// The baseline disappeared from the file table while the document
    /// was open. Distinct from both clean and modified; the path stays
    /// in the unsaved set until a baseline reappears.
    Orphaned,
}

/// Incrementally maintained dirtiness view. Every store mutation that
/// touches a path's content or baseline recomputes exactly that path;
/// there is never a full re-diff of all open documents.
#[derive(Debug, Clone, Default)]
pub struct DirtyState {
    status: FxHashMap<PathBuf, DirtyStatus>,
    unsaved: FxHashSet<PathBuf>,
}

impl DirtyState {
    pub fn status(&self, path: &Path) -> DirtyStatus {
        self.status
            .get(path)
            .copied()
            .unwrap_or(DirtyStatus::InSync)
    }

    pub fn is_dirty(&self, path: &Path) -> bool {
        self.unsaved.contains(path)
    }

    pub fn unsaved(&self) -> &FxHashSet<PathBuf> {
        &self.unsaved
    }

    /// Re-derives one path's status from its document and baseline.
    /// Returns whether the externally visible status changed.
    ///
    /// A loading document keeps its previous status: an in-flight save
    /// must not knock its path out of the unsaved set before the write
    /// commits.
    pub fn recompute(&mut self, path: &Path, file: Option<&File>, doc: Option<&Document>) -> bool {
        if doc.is_some_and(|doc| doc.loading) {
            return false;
        }

        let next = match doc {
            None => DirtyStatus::InSync,
            Some(doc) if doc.is_binary => DirtyStatus::InSync,
            Some(doc) => match file {
                None => DirtyStatus::Orphaned,
                Some(file) => match file.content.as_deref() {
                    Some(baseline) if baseline != doc.content => DirtyStatus::Modified,
                    _ => DirtyStatus::InSync,
                },
            },
        };

        let prev = self.status(path);
        if prev == next {
            return false;
        }

        if next == DirtyStatus::InSync {
            self.status.remove(path);
            self.unsaved.remove(path);
        } else {
            self.status.insert(path.to_path_buf(), next);
            self.unsaved.insert(path.to_path_buf());
        }
        true
    }
}
