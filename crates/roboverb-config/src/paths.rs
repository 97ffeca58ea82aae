//! Where user presets live on disk.
//!
//! - Linux: `~/.config/roboverb/presets/`
//! - macOS: `~/Library/Application Support/roboverb/presets/`
//! - Windows: `%APPDATA%\roboverb\presets\`

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_NAME: &str = "roboverb";
const PRESETS_SUBDIR: &str = "presets";
const PRESET_EXTENSION: &str = "toml";

/// Returns the user presets directory.
///
/// Falls back to `./roboverb/presets` if the platform config directory
/// cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Find a preset file by path or by name.
///
/// `name` is first tried as a path. Otherwise it is looked up in the user
/// presets directory, with `.toml` appended if missing.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }
    find_preset_in(&user_presets_dir(), name)
}

fn find_preset_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.{PRESET_EXTENSION}")
    };
    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Create the user presets directory if it does not exist yet.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List the preset files in the user presets directory, sorted by path.
///
/// Returns an empty vector if the directory is missing or unreadable.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_preset_file(path))
        .collect();
    presets.sort();
    presets
}

fn is_preset_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == PRESET_EXTENSION)
}

/// File stem of a preset path, used as its display name.
///
/// ```rust
/// use roboverb_config::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/presets/tin_can.toml"));
/// assert_eq!(name.as_deref(), Some("tin_can"));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
