//! Trait definitions for dependency injection

use crate::core::TipResult;
use crate::environment::Environment;
use crate::package::PackageSpecifier;
use std::path::{Path, PathBuf};

/// Trait for configuration access
///
/// Provides read-only access to already-resolved paths.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Tip home directory
    fn tip_home(&self) -> &Path;

    /// Store root holding `<name>/<version>/` installs
    fn site_packages_dir(&self) -> PathBuf;

    /// Cache root, or `None` when the cache is disabled
    fn cache_dir(&self) -> Option<PathBuf>;

    /// Shared link space directory
    fn links_dir(&self) -> PathBuf;

    /// Directory holding one file per environment
    fn environments_dir(&self) -> PathBuf;

    /// Name of the active environment, if any
    fn active_environment(&self) -> Option<String>;

    /// Interpreter used to run code
    fn python(&self) -> &str;
}

/// The external installer capability
///
/// Given one package and an empty target directory, populates the directory
/// with that package's files and returns the package's direct dependencies as
/// specifier strings. The strings are validated by the caller, not here.
pub trait PackageInstaller: Send + Sync {
    fn install(&self, spec: &PackageSpecifier, target: &Path) -> TipResult<Vec<String>>;
}

/// Storage for environments
///
/// Keeps resolution logic independent of where environments live.
pub trait EnvironmentRepository: Send + Sync {
    /// Where the environment called `name` is stored
    fn locate(&self, name: &str) -> PathBuf;

    /// Whether an environment called `name` exists
    fn exists(&self, name: &str) -> bool;

    /// Load the environment called `name`
    ///
    /// Fails with `NotFound` if it does not exist and `Corrupted` if it can't be read.
    fn load(&self, name: &str) -> TipResult<Environment>;

    /// Persist an environment
    ///
    /// Fails with `AlreadyExists` if it exists and `rewrite` is false.
    fn save(&self, environment: &Environment, rewrite: bool) -> TipResult<()>;

    /// Delete the environment called `name`
    fn delete(&self, name: &str) -> TipResult<()>;

    /// Names of all stored environments, sorted
    fn list(&self) -> TipResult<Vec<String>>;
}
