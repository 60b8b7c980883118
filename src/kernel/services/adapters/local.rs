use ignore::WalkBuilder;
use memchr::memchr;
use rustc_hash::FxHashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::kernel::files::File;
use crate::kernel::services::ports::file::{FileError, FileProvider, Result};
use crate::kernel::services::ports::WorkbenchConfig;

/// Names that never belong in a workspace snapshot.
pub fn should_ignore(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store"
            | ".Spotlight-V100"
            | ".Trashes"
            | ".fseventsd"
            | ".TemporaryItems"
            | "Thumbs.db"
            | "desktop.ini"
            | ".git"
            | "node_modules"
            | "target"
    )
}

/// Local filesystem provider: gitignore-aware workspace walks, NUL-probe
/// binary classification and deferred content for oversized files.
pub struct LocalFileProvider {
    config: WorkbenchConfig,
}

impl LocalFileProvider {
    pub fn new() -> Self {
        Self::with_config(WorkbenchConfig::default())
    }

    pub fn with_config(config: WorkbenchConfig) -> Self {
        Self { config }
    }

    fn classify(&self, path: &Path, len: u64) -> Result<File> {
        if len > self.config.max_inline_file_size {
            let mut handle = fs::File::open(path).map_err(|e| io_error(path, e))?;
            let mut probe = vec![0u8; self.config.binary_probe_len];
            let n = handle.read(&mut probe).map_err(|e| io_error(path, e))?;
            if memchr(0, &probe[..n]).is_some() {
                return Ok(File::binary());
            }
            return Ok(File::deferred());
        }

        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        let probe_len = bytes.len().min(self.config.binary_probe_len);
        if memchr(0, &bytes[..probe_len]).is_some() {
            return Ok(File::binary());
        }
        match String::from_utf8(bytes) {
            Ok(text) => Ok(File::text(text)),
            Err(_) => Ok(File::binary()),
        }
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for LocalFileProvider {
    fn scheme(&self) -> &'static str {
        "file"
    }

    fn snapshot(&self, root: &Path) -> Result<FxHashMap<PathBuf, File>> {
        let mut entries = FxHashMap::default();

        let walk = WalkBuilder::new(root)
            .follow_links(false)
            .filter_entry(|entry| !should_ignore(&entry.file_name().to_string_lossy()))
            .build();

        for result in walk {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let len = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping entry without metadata");
                    continue;
                }
            };
            match self.classify(path, len) {
                Ok(file) => {
                    entries.insert(path.to_path_buf(), file);
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }

        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| io_error(path, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Path, e: io::Error) -> FileError {
    match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
        _ => FileError::Io(e),
    }
}
