use rustc_hash::FxHashMap;
use std::path::PathBuf;

use super::documents::ScrollPosition;
use super::files::File;

#[derive(Debug, Clone)]
pub enum Action {
    /// Wholesale baseline push from the filesystem collaborator.
    SetFiles {
        files: FxHashMap<PathBuf, File>,
    },
    SelectFile {
        path: Option<PathBuf>,
    },
    EditCurrent {
        content: String,
    },
    ScrollCurrent {
        position: ScrollPosition,
    },
    SetVisible {
        visible: bool,
    },
    /// A write for `path` went in flight; the document suspends until
    /// `SaveCompleted`/`SaveFailed` lands.
    SaveStarted {
        path: PathBuf,
    },
    SaveCompleted {
        path: PathBuf,
        content: String,
    },
    SaveFailed {
        path: PathBuf,
    },
    ResetDocument {
        path: PathBuf,
    },
    /// Deferred content delivered for a loading document.
    FileLoaded {
        path: PathBuf,
        content: String,
    },
    FileLoadFailed {
        path: PathBuf,
    },
}
