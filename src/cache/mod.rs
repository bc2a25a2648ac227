use crate::core::path::{
    check_package_segments, copy_dir_recursive, ensure_dir, file_name_str, remove_dir_if_exists,
};
use crate::core::{TipError, TipResult};
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Prefix of directories being copied into the cache
const STAGING_PREFIX: &str = ".staging-";

/// Prefix of stale entries moved aside before deletion
const EVICTED_PREFIX: &str = ".evicted-";

static EVICTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Mirror of installed package directories
///
/// Entries live at `<root>/<name>/<version>/`. An entry is valid while its
/// modification time is at least that of the package directory it mirrors.
/// Entries are copied under a unique staging name and renamed into place, so
/// readers never see a half-written entry.
///
/// Without a root the cache is disabled and `get` hands back the package
/// directory itself.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    root: Option<PathBuf>,
}

impl Cache {
    /// Create a cache rooted at `root`, or a disabled one
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// A cache that passes every package directory through unchanged
    pub fn disabled() -> Self {
        Self { root: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Cache root directory
    pub fn root(&self) -> TipResult<&Path> {
        self.root.as_deref().ok_or(TipError::CacheDisabled)
    }

    /// Cache path for one package
    ///
    /// Fails with `MalformedSpecifier` when either part would leave the cache root.
    pub fn entry_path(&self, name: &str, version: &str) -> TipResult<PathBuf> {
        check_package_segments(name, version)?;
        Ok(self.root()?.join(name).join(version))
    }

    /// Get the cached copy of `package_dir`, refreshing it if stale
    ///
    /// The entry is addressed by the last two segments of `package_dir`
    /// (`<name>/<version>`).
    pub fn get(&self, package_dir: &Path) -> TipResult<PathBuf> {
        let Some(root) = self.root.as_deref() else {
            return Ok(package_dir.to_path_buf());
        };

        let (name, version) = package_coordinates(package_dir)?;
        check_package_segments(name, version)?;
        let cache_path = root.join(name).join(version);
        let source_mtime = fs::metadata(package_dir)?.modified()?;

        if let Some(cached_mtime) = modified(&cache_path) {
            if cached_mtime >= source_mtime {
                tracing::debug!(package = %format!("{}=={}", name, version), "cache hit");
                return Ok(cache_path);
            }
            tracing::debug!(package = %format!("{}=={}", name, version), "cache entry is stale");
        }

        publish(package_dir, &cache_path, source_mtime)?;
        Ok(cache_path)
    }

    /// Drop the entry of one package
    ///
    /// Returns whether an entry existed. A disabled cache has nothing to drop.
    pub fn evict(&self, name: &str, version: &str) -> TipResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }
        let cache_path = self.entry_path(name, version)?;
        let removed = move_aside_and_remove(&cache_path)?;
        if removed {
            tracing::debug!(package = %format!("{}=={}", name, version), "evicted cache entry");
        }
        Ok(removed)
    }

    /// Delete the whole cache root
    ///
    /// Missing roots and disabled caches are not an error.
    pub fn clear(&self) -> TipResult<()> {
        if let Some(root) = self.root.as_deref() {
            if remove_dir_if_exists(root)? {
                tracing::info!(root = %root.display(), "cleared cache");
            }
        }
        Ok(())
    }
}

/// `(name, version)` from the last two segments of a package directory
fn package_coordinates(package_dir: &Path) -> TipResult<(&str, &str)> {
    let version = file_name_str(package_dir);
    let name = package_dir.parent().and_then(file_name_str);
    match (name, version) {
        (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
            Ok((name, version))
        }
        _ => Err(TipError::Path(format!(
            "Cannot derive package name and version from {}",
            package_dir.display()
        ))),
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Copy `package_dir` to a staging sibling of `cache_path` and rename it into place
fn publish(package_dir: &Path, cache_path: &Path, source_mtime: SystemTime) -> TipResult<()> {
    let parent = cache_path
        .parent()
        .ok_or_else(|| TipError::Path(format!("Invalid cache path {}", cache_path.display())))?;
    ensure_dir(parent)?;

    // Dropping the guard removes whatever is left at the staging path.
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)?;
    copy_dir_recursive(package_dir, staging.path())?;
    filetime::set_file_mtime(staging.path(), FileTime::from_system_time(source_mtime))?;

    // Fresh entries are never moved aside, so a concurrent publisher's work stays put.
    if modified(cache_path).is_some_and(|m| m >= source_mtime) {
        tracing::debug!(entry = %cache_path.display(), "entry refreshed concurrently, discarding copy");
        return Ok(());
    }
    move_aside_and_remove(cache_path)?;

    match fs::rename(staging.path(), cache_path) {
        Ok(()) => {
            tracing::debug!(entry = %cache_path.display(), "published cache entry");
            Ok(())
        }
        Err(_) if cache_path.exists() => {
            tracing::debug!(entry = %cache_path.display(), "lost publish race, discarding copy");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Rename `path` to a private name, then delete it
///
/// Concurrent callers never delete the same tree.
fn move_aside_and_remove(path: &Path) -> TipResult<bool> {
    let (Some(parent), Some(name)) = (path.parent(), file_name_str(path)) else {
        return Ok(false);
    };
    let aside = parent.join(format!(
        "{}{}-{}-{}",
        EVICTED_PREFIX,
        name,
        std::process::id(),
        EVICTION_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    match fs::rename(path, &aside) {
        Ok(()) => {
            remove_dir_if_exists(&aside)?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
