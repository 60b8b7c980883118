use std::path::PathBuf;

/// Side effects requested by a dispatch. The app layer executes them off
/// the store lock and feeds results back as actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch deferred content for a lazily materialized document.
    LoadFile(PathBuf),
}
