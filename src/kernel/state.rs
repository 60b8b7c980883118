use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

use super::dirty::DirtyState;
use super::documents::{Document, DocumentCache};
use super::files::FileTable;

/// Panel-level UI state. The workbench starts hidden and is revealed by
/// the host once there is something to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub visible: bool,
}

/// The single selected path, or none.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Option<PathBuf>,
}

impl SelectionState {
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn set(&mut self, path: Option<PathBuf>) -> bool {
        if self.current == path {
            return false;
        }
        self.current = path;
        true
    }
}

/// The composed workbench state. All mutation goes through
/// `Store::dispatch`, which keeps the file table, document cache and
/// dirty set consistent within a single dispatch.
#[derive(Debug, Clone, Default)]
pub struct WorkbenchState {
    pub files: FileTable,
    pub documents: DocumentCache,
    pub selection: SelectionState,
    pub dirty: DirtyState,
    pub ui: UiState,
}

impl WorkbenchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived projection: the document for the selected path, if any.
    pub fn current_document(&self) -> Option<&Document> {
        self.documents.get(self.selection.current()?)
    }

    pub fn unsaved_files(&self) -> &FxHashSet<PathBuf> {
        self.dirty.unsaved()
    }
}
