use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::files::File;

/// Cosmetic editor position, preserved across selection changes. Has no
/// effect on dirtiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub line: usize,
    pub column: usize,
}

/// Live, possibly-unsaved editable state for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
    pub scroll: Option<ScrollPosition>,
    pub is_binary: bool,
    pub loading: bool,
}

impl Document {
    /// Materializes a document from its baseline. Deferred text content
    /// leaves the document in `loading` state until a `FileLoaded`
    /// action delivers it.
    pub fn materialize(path: PathBuf, file: &File) -> Self {
        let loading = !file.is_binary && file.content.is_none();
        Self {
            path,
            content: file.content.clone().unwrap_or_default(),
            scroll: None,
            is_binary: file.is_binary,
            loading,
        }
    }
}

/// Keyed store of every document visited this session. Documents are
/// created lazily on first selection and never evicted, so edits and
/// scroll positions survive selection changes.
#[derive(Debug, Clone, Default)]
pub struct DocumentCache {
    docs: FxHashMap<PathBuf, Document>,
}

impl DocumentCache {
    pub fn get(&self, path: &Path) -> Option<&Document> {
        self.docs.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.docs.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.docs.keys()
    }

    /// Returns the document for `path`, materializing it from `file` on
    /// first access.
    pub fn ensure(&mut self, path: &Path, file: &File) -> &Document {
        self.docs
            .entry(path.to_path_buf())
            .or_insert_with(|| Document::materialize(path.to_path_buf(), file))
    }

    /// Overwrites live content for an editable document. Binary and
    /// still-loading documents reject edits.
    pub fn set_content(&mut self, path: &Path, content: &str) -> bool {
        match self.docs.get_mut(path) {
            Some(doc) if !doc.is_binary && !doc.loading && doc.content != content => {
                doc.content = content.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn set_scroll(&mut self, path: &Path, position: ScrollPosition) -> bool {
        match self.docs.get_mut(path) {
            Some(doc) if doc.scroll != Some(position) => {
                doc.scroll = Some(position);
                true
            }
            _ => false,
        }
    }

    pub fn set_loading(&mut self, path: &Path, loading: bool) -> bool {
        match self.docs.get_mut(path) {
            Some(doc) if doc.loading != loading => {
                doc.loading = loading;
                true
            }
            _ => false,
        }
    }

    /// Delivers asynchronously fetched content for a loading document.
    pub fn apply_loaded(&mut self, path: &Path, content: &str) -> bool {
        match self.docs.get_mut(path) {
            Some(doc) if doc.loading => {
                doc.content = content.to_string();
                doc.loading = false;
                true
            }
            _ => false,
        }
    }

    /// Forces live content regardless of dirtiness; used by reset and by
    /// baseline reconciliation of clean documents.
    pub fn overwrite_content(&mut self, path: &Path, content: &str) -> bool {
        match self.docs.get_mut(path) {
            Some(doc) if doc.content != content => {
                doc.content = content.to_string();
                true
            }
            _ => false,
        }
    }
}
