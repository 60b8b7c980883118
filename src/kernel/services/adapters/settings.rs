use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::WorkbenchConfig;

const SETTINGS_DIR: &str = ".workbench";
const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(SETTINGS_DIR).join(SETTINGS_FILE)
}

/// Creates the settings file with defaults if it does not exist yet.
pub fn ensure_settings_file(workspace_root: &Path) -> io::Result<PathBuf> {
    let path = get_settings_path(workspace_root);
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&WorkbenchConfig::default())
            .unwrap_or_else(|_| "{}".to_string());
        fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_config(workspace_root: &Path) -> Option<WorkbenchConfig> {
    let data = fs::read_to_string(get_settings_path(workspace_root)).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = std::env::temp_dir().join("workbench").join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
