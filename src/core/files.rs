//! File system helpers: default locations and whole-file writes.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Application directory name under the platform data directory.
pub const APP_DIR: &str = "pick-duel";

/// Path: ~/.local/share/pick-duel (or the platform equivalent).
///
/// Falls back to `~/.local/share` and finally the working directory when
/// the platform directories cannot be resolved.
pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".local");
        home.push("share");
        home
    });
    base.join(APP_DIR)
}

/// Default location of the picks database.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("picks.db")
}

/// Write a string to file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}
