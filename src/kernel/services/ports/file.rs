use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::kernel::files::File;

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    NotAFile(PathBuf),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::PermissionDenied(p) => write!(f, "Permission denied: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

/// Filesystem collaborator: supplies wholesale `path -> File` snapshots
/// and accepts best-effort text writes with a success/failure result.
///
/// Implementations must be callable from blocking worker threads; the
/// app layer never invokes them while holding the store lock.
pub trait FileProvider: Send + Sync {
    fn scheme(&self) -> &'static str;

    /// Builds a complete baseline snapshot of the workspace under
    /// `root`. Oversized text files may be returned with deferred
    /// content; the engine fetches them through `read_file` on demand.
    fn snapshot(&self, root: &Path) -> Result<FxHashMap<PathBuf, File>>;

    fn read_file(&self, path: &Path) -> Result<String>;

    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
}
