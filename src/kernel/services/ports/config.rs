use serde::{Deserialize, Serialize};

/// Engine tunables, loaded from the workspace settings file. Missing
/// keys fall back to defaults so old settings files keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Text files larger than this many bytes get deferred content in
    /// snapshots and are fetched lazily on first selection.
    pub max_inline_file_size: u64,
    /// How many leading bytes to probe for NUL when classifying a file
    /// as binary.
    pub binary_probe_len: usize,
    /// Quiet window the filesystem watcher waits for before rebuilding
    /// and pushing a snapshot.
    pub watch_debounce_ms: u64,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            max_inline_file_size: 512 * 1024,
            binary_probe_len: 8 * 1024,
            watch_debounce_ms: 250,
        }
    }
}
