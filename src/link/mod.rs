//! One shared directory of symlinks to every installed package's top-level modules

use crate::core::path::{ensure_dir, file_name_str};
use crate::core::{TipError, TipResult};
use crate::package::layout::ModuleLayout;
use crate::package::PackageSpecifier;
use std::fs;
use std::path::{Path, PathBuf};

/// A link in the link space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Base name of the link (same as the linked file or directory)
    pub name: String,
    /// Where the link points, resolved against the link directory
    pub target: PathBuf,
}

/// Flat directory exposing importable units of many package installs
///
/// There is at most one link per top-level name. Mounting a package whose
/// top-level name is already linked replaces the old link: the last install
/// wins. Nothing is unmounted explicitly.
#[derive(Debug, Clone)]
pub struct LinkSpace {
    dir: PathBuf,
    layout: ModuleLayout,
}

impl LinkSpace {
    pub fn new(dir: PathBuf, layout: ModuleLayout) -> Self {
        Self { dir, layout }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Link every importable unit of an installed package into the link space
    ///
    /// Returns the created link paths.
    pub fn mount(&self, spec: &PackageSpecifier, package_dir: &Path) -> TipResult<Vec<PathBuf>> {
        ensure_dir(&self.dir)?;

        let mut created = Vec::new();
        for unit in self.layout.top_level_units(package_dir)? {
            let base_name = file_name_str(&unit.path)
                .ok_or_else(|| TipError::Path(format!("Invalid path {}", unit.path.display())))?;
            let link_path = self.dir.join(base_name);

            self.unlink_existing(&link_path, spec)?;
            create_symlink(&unit.path, &link_path, &self.dir)?;
            created.push(link_path);
        }

        tracing::debug!(package = %spec, links = created.len(), "mounted package into link space");
        Ok(created)
    }

    /// Every link currently in the link space, sorted by name
    pub fn entries(&self) -> TipResult<Vec<LinkEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let Ok(target) = fs::read_link(&path) else {
                continue;
            };
            entries.push(LinkEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                target: self.dir.join(target),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn unlink_existing(&self, link_path: &Path, spec: &PackageSpecifier) -> TipResult<()> {
        let Ok(metadata) = link_path.symlink_metadata() else {
            return Ok(());
        };
        if !metadata.file_type().is_symlink() {
            return Err(TipError::AlreadyExists {
                path: link_path.to_path_buf(),
            });
        }
        if let Ok(previous) = fs::read_link(link_path) {
            tracing::warn!(
                link = %link_path.display(),
                previous = %previous.display(),
                package = %spec,
                "replacing link owned by another install"
            );
        }
        remove_symlink(link_path)
    }
}

/// Create a symlink at `link` pointing at `target`, relative to `base` when possible
fn create_symlink(target: &Path, link: &Path, base: &Path) -> TipResult<()> {
    let relative = pathdiff::diff_paths(target, base).unwrap_or_else(|| target.to_path_buf());

    #[cfg(unix)]
    std::os::unix::fs::symlink(&relative, link)?;

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(&relative, link)?;
        } else {
            std::os::windows::fs::symlink_file(&relative, link)?;
        }
    }

    Ok(())
}

fn remove_symlink(link: &Path) -> TipResult<()> {
    #[cfg(windows)]
    {
        if link.is_dir() {
            fs::remove_dir(link)?;
            return Ok(());
        }
    }
    fs::remove_file(link)?;
    Ok(())
}
