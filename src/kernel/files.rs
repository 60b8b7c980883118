use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Last-known-saved snapshot of one workspace file.
///
/// `content` is `None` when the provider deferred materialization (large
/// payloads) or when the file is binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub content: Option<String>,
    pub is_binary: bool,
}

impl File {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            is_binary: false,
        }
    }

    pub fn binary() -> Self {
        Self {
            content: None,
            is_binary: true,
        }
    }

    /// Text file whose content has not been read yet.
    pub fn deferred() -> Self {
        Self {
            content: None,
            is_binary: false,
        }
    }
}

/// Authoritative `path -> File` baseline mapping. Source of truth for
/// dirtiness comparison; replaced wholesale when the filesystem
/// collaborator pushes a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct FileTable {
    entries: FxHashMap<PathBuf, File>,
}

impl FileTable {
    pub fn get(&self, path: &Path) -> Option<&File> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Baseline text for `path`, if it exists and has been materialized.
    pub fn baseline(&self, path: &Path) -> Option<&str> {
        self.entries.get(path)?.content.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }

    pub fn snapshot(&self) -> FxHashMap<PathBuf, File> {
        self.entries.clone()
    }

    /// Atomically swaps the whole mapping. Paths absent from `entries`
    /// lose their baseline.
    pub fn replace_all(&mut self, entries: FxHashMap<PathBuf, File>) -> bool {
        if self.entries == entries {
            return false;
        }
        self.entries = entries;
        true
    }

    /// Commits a new baseline after a successful write. Inserts the entry
    /// when the file reappeared on disk between dispatches.
    pub fn commit(&mut self, path: &Path, content: String) -> bool {
        match self.entries.get_mut(path) {
            Some(file) if file.content.as_deref() == Some(content.as_str()) => false,
            Some(file) => {
                file.content = Some(content);
                file.is_binary = false;
                true
            }
            None => {
                self.entries.insert(path.to_path_buf(), File::text(content));
                true
            }
        }
    }

    /// Fills in deferred content delivered by an asynchronous load. Keeps
    /// any content a newer snapshot already materialized.
    pub fn fill_content(&mut self, path: &Path, content: &str) -> bool {
        match self.entries.get_mut(path) {
            Some(file) if file.content.is_none() && !file.is_binary => {
                file.content = Some(content.to_string());
                true
            }
            _ => false,
        }
    }
}
