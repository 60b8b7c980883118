//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod local;
pub mod runtime;
pub mod settings;
pub mod watcher;

pub use local::{should_ignore, LocalFileProvider};
pub use runtime::TokioExecutor;
pub use settings::{ensure_log_dir, ensure_settings_file, get_settings_path, load_config};
pub use watcher::SnapshotWatcher;
