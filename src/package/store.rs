//! Content-addressed installs: one directory per exact `name==version`

use crate::cache::Cache;
use crate::core::path::{check_package_segments, ensure_dir, file_name_str, remove_dir_if_exists};
use crate::core::{TipError, TipResult};
use crate::di::PackageInstaller;
use crate::link::LinkSpace;
use crate::package::{sidecar, PackageSpecifier};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of directories an install is staged in
const INSTALLING_PREFIX: &str = ".installing-";

/// What `PackageStore::install` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The package directory already existed; nothing ran
    AlreadyInstalled,
    /// The installer ran; these are the dependencies it reported
    Installed { dependencies: Vec<String> },
}

/// Installed packages under `<root>/<name>/<version>/`
///
/// An install is staged in a hidden sibling directory and renamed into place
/// together with its dependency record, so a package directory either exists
/// complete or not at all.
#[derive(Debug, Clone)]
pub struct PackageStore {
    root: PathBuf,
    cache: Cache,
    links: Option<LinkSpace>,
}

impl PackageStore {
    pub fn new(root: PathBuf, cache: Cache) -> Self {
        Self {
            root,
            cache,
            links: None,
        }
    }

    /// Mount every new install into `links`
    pub fn with_links(mut self, links: LinkSpace) -> Self {
        self.links = Some(links);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn links(&self) -> Option<&LinkSpace> {
        self.links.as_ref()
    }

    /// Directory of one package; it need not exist
    ///
    /// Names and versions that are `.`, `..` or hold a path separator are
    /// rejected with `MalformedSpecifier`, so the result is always below the root.
    pub fn locate(&self, name: &str, version: &str) -> TipResult<PathBuf> {
        check_package_segments(name, version)?;
        Ok(self.root.join(name).join(version))
    }

    /// Directory of the package identified by `spec`
    pub fn locate_spec(&self, spec: &PackageSpecifier) -> TipResult<PathBuf> {
        self.locate(spec.name(), spec.version())
    }

    pub fn is_installed(&self, spec: &PackageSpecifier) -> bool {
        self.locate_spec(spec).map_or(false, |dir| dir.is_dir())
    }

    /// Install one package, without its dependencies
    ///
    /// A no-op when the package is already installed. On installer failure the
    /// staging directory is removed and `InstallFailed` names the package.
    pub fn install(
        &self,
        spec: &PackageSpecifier,
        installer: &dyn PackageInstaller,
    ) -> TipResult<InstallOutcome> {
        let package_dir = self.locate_spec(spec)?;
        if package_dir.is_dir() {
            tracing::debug!(package = %spec, "already installed");
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let parent = self.root.join(spec.name());
        ensure_dir(&parent)?;

        tracing::info!(package = %spec, "installing");
        // Dropping the guard removes the staging directory if anything below fails.
        let staging = tempfile::Builder::new()
            .prefix(INSTALLING_PREFIX)
            .tempdir_in(&parent)?;

        let dependencies = installer
            .install(spec, staging.path())
            .map_err(|e| install_failed(spec, e))?;
        sidecar::write(staging.path(), &dependencies).map_err(|e| install_failed(spec, e))?;

        match fs::rename(staging.path(), &package_dir) {
            Ok(()) => {}
            Err(_) if package_dir.is_dir() => {
                tracing::debug!(package = %spec, "installed concurrently, discarding staged copy");
            }
            Err(e) => return Err(install_failed(spec, TipError::from(e))),
        }

        if let Some(links) = &self.links {
            links.mount(spec, &package_dir)?;
        }
        // The package is in place; a stale cache is rebuilt on the next resolve.
        if let Err(e) = self.cache.get(&package_dir) {
            tracing::warn!(package = %spec, error = %e, "could not refresh cache entry");
        }

        tracing::info!(package = %spec, dependencies = dependencies.len(), "installed");
        Ok(InstallOutcome::Installed { dependencies })
    }

    /// Delete an installed package and its cache entry
    pub fn uninstall(&self, spec: &PackageSpecifier) -> TipResult<()> {
        let package_dir = self.locate_spec(spec)?;
        if !package_dir.is_dir() {
            return Err(TipError::NotInstalled {
                spec: spec.to_string(),
            });
        }
        remove_dir_if_exists(&package_dir)?;
        self.cache.evict(spec.name(), spec.version())?;

        // The name directory goes once its last version is gone.
        let _ = fs::remove_dir(self.root.join(spec.name()));

        tracing::info!(package = %spec, "uninstalled");
        Ok(())
    }

    /// Dependencies recorded when the package was installed
    pub fn dependencies_of(&self, spec: &PackageSpecifier) -> TipResult<Vec<PackageSpecifier>> {
        let package_dir = self.locate_spec(spec)?;
        if !package_dir.is_dir() {
            return Err(TipError::NotInstalled {
                spec: spec.to_string(),
            });
        }
        sidecar::read(&package_dir)
    }

    /// Every installed package, sorted by name then version
    pub fn list_installed(&self) -> TipResult<Vec<PackageSpecifier>> {
        let mut installed = Vec::new();
        for name_dir in visible_dirs(&self.root)? {
            let Some(name) = file_name_str(&name_dir) else {
                continue;
            };
            for version_dir in visible_dirs(&name_dir)? {
                if let Some(version) = file_name_str(&version_dir) {
                    if let Ok(spec) = PackageSpecifier::new(name, version) {
                        installed.push(spec);
                    }
                }
            }
        }
        installed.sort_by(|a, b| (a.name(), a.version()).cmp(&(b.name(), b.version())));
        Ok(installed)
    }
}

fn install_failed(spec: &PackageSpecifier, error: impl Into<TipError>) -> TipError {
    let cause = match error.into() {
        TipError::InstallFailed { cause, .. } => cause,
        other => other.to_string(),
    };
    tracing::warn!(package = %spec, %cause, "install failed");
    TipError::InstallFailed {
        spec: spec.to_string(),
        cause,
    }
}

/// Subdirectories of `dir` whose names don't start with a dot
fn visible_dirs(dir: &Path) -> TipResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = file_name_str(&path).map_or(true, |n| n.starts_with('.'));
        if path.is_dir() && !hidden {
            dirs.push(path);
        }
    }
    Ok(dirs)
}
