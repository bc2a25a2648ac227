use crate::core::error::{TipError, TipResult};
use std::path::{Path, PathBuf};

/// Environment variable overriding the Tip home directory.
pub const TIP_HOME_ENV: &str = "TIP_HOME";

/// Get the Tip home directory
///
/// `TIP_HOME` wins when set. Otherwise the platform data directory is used:
/// - Windows: %APPDATA%\tip
/// - Linux: ~/.local/share/tip
/// - macOS: ~/Library/Application Support/tip
pub fn tip_home() -> TipResult<PathBuf> {
    if let Some(home) = std::env::var_os(TIP_HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    let data_dir = dirs::data_dir()
        .ok_or_else(|| TipError::Path("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("tip"))
}

/// Get the default cache directory
///
/// Platform-specific locations:
/// - Windows: %LOCALAPPDATA%\tip
/// - Linux: ~/.cache/tip
/// - macOS: ~/Library/Caches/tip
pub fn default_cache_dir() -> TipResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| TipError::Path("Could not determine cache directory".to_string()))?;
    Ok(cache_dir.join("tip"))
}

/// Config file inside the Tip home (`<home>/config.yaml`)
pub fn config_file(home: &Path) -> PathBuf {
    home.join("config.yaml")
}

/// Default store root (`<home>/site-packages`)
pub fn site_packages_dir(home: &Path) -> PathBuf {
    home.join("site-packages")
}

/// Directory holding one file per environment (`<home>/environments`)
pub fn environments_dir(home: &Path) -> PathBuf {
    home.join("environments")
}

/// Default link space directory (`<home>/links`)
pub fn links_dir(home: &Path) -> PathBuf {
    home.join("links")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> TipResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Remove a directory tree, treating a missing directory as success
pub fn remove_dir_if_exists(path: &Path) -> TipResult<bool> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Copy a directory recursively
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> TipResult<()> {
    std::fs::create_dir_all(dst)?;

    for entry in walkdir::WalkDir::new(src) {
        let entry = entry?;
        let path = entry.path();
        let relative = path
            .strip_prefix(src)
            .map_err(|e| TipError::Path(e.to_string()))?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let dest_path = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(path, &dest_path)?;
        }
    }

    Ok(())
}

/// Whether `part` names exactly one directory entry below a root
///
/// Rejects empty parts, `.` and `..`, and anything holding a separator or a
/// drive colon.
pub fn is_single_segment(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\', ':'])
}

/// Fail with `MalformedSpecifier` unless `name` and `version` both stay inside a
/// `<root>/<name>/<version>` tree
pub fn check_package_segments(name: &str, version: &str) -> TipResult<()> {
    if is_single_segment(name) && is_single_segment(version) {
        return Ok(());
    }
    Err(TipError::MalformedSpecifier {
        input: format!("{}=={}", name, version),
    })
}

/// Last path component as UTF-8, if there is one
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
