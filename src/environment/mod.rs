//! Named sets of exact package versions

pub mod repository;

pub use repository::FileEnvironmentRepository;

use crate::core::path::{ensure_dir, file_name_str};
use crate::core::{TipError, TipResult};
use crate::package::PackageSpecifier;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Extension of environment files
pub const ENVIRONMENT_EXTENSION: &str = "json";

/// A named, ordered mapping of package name to exact version
///
/// Each package name occurs at most once. Insertion order is kept in memory
/// for display only; the file format is a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    name: String,
    packages: IndexMap<String, String>,
}

/// What `add_package` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Unchanged,
    Replaced { previous_version: String },
}

impl Environment {
    /// An empty environment
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packages: IndexMap::new(),
        }
    }

    /// Load an environment file
    ///
    /// The environment is named after the file stem.
    pub fn load(path: &Path) -> TipResult<Self> {
        if !path.is_file() {
            return Err(TipError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let packages: IndexMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| TipError::corrupted(path, format!("not a package mapping: {}", e)))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let mut environment = Self::new(name);
        for (package, version) in packages {
            let spec = PackageSpecifier::new(package, version)
                .map_err(|e| TipError::corrupted(path, e))?;
            environment.insert(spec);
        }
        Ok(environment)
    }

    /// Save to `path`, refusing to clobber an existing file unless `rewrite`
    pub fn save(&self, path: &Path, rewrite: bool) -> TipResult<()> {
        if path.exists() && !rewrite {
            return Err(TipError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.packages)?;
        fs::write(path, content)?;
        tracing::debug!(environment = %self.name, path = %path.display(), "saved environment");
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package name to version, in insertion order
    pub fn packages(&self) -> &IndexMap<String, String> {
        &self.packages
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Version of `name` in this environment
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }

    /// Whether this exact specifier is part of the environment
    pub fn contains(&self, spec: &PackageSpecifier) -> bool {
        self.version_of(spec.name()) == Some(spec.version())
    }

    /// Every package as a specifier, in insertion order
    pub fn specifiers(&self) -> Vec<PackageSpecifier> {
        self.packages
            .iter()
            .filter_map(|(name, version)| PackageSpecifier::new(name, version).ok())
            .collect()
    }

    /// Add a package
    ///
    /// A new name is inserted; the same version is a no-op. A different version
    /// replaces the stored one when `replace` is set and fails with
    /// `VersionConflict` otherwise.
    pub fn add_package(&mut self, spec: &PackageSpecifier, replace: bool) -> TipResult<AddOutcome> {
        match self.packages.get(spec.name()) {
            None => {
                self.insert(spec.clone());
                Ok(AddOutcome::Added)
            }
            Some(existing) if existing == spec.version() => Ok(AddOutcome::Unchanged),
            Some(existing) if !replace => Err(TipError::VersionConflict {
                name: spec.name().to_string(),
                existing_version: existing.clone(),
            }),
            Some(existing) => {
                let previous_version = existing.clone();
                self.insert(spec.clone());
                Ok(AddOutcome::Replaced { previous_version })
            }
        }
    }

    /// Remove a package
    ///
    /// Fails with `NotPresent` if the name is absent and with `VersionMismatch`
    /// if the environment holds a different version than requested.
    pub fn remove_package(&mut self, spec: &PackageSpecifier) -> TipResult<()> {
        let actual = self
            .packages
            .get(spec.name())
            .ok_or_else(|| TipError::NotPresent {
                name: spec.name().to_string(),
            })?;
        if actual != spec.version() {
            return Err(TipError::VersionMismatch {
                requested: spec.to_string(),
                actual: format!("{}=={}", spec.name(), actual),
            });
        }
        self.packages.shift_remove(spec.name());
        Ok(())
    }

    /// Add every package of `other`, stopping at the first conflict
    pub fn extend_from(&mut self, other: &Environment, replace: bool) -> TipResult<usize> {
        let mut added = 0;
        for spec in other.specifiers() {
            if self.add_package(&spec, replace)? != AddOutcome::Unchanged {
                added += 1;
            }
        }
        Ok(added)
    }

    fn insert(&mut self, spec: PackageSpecifier) {
        self.packages
            .insert(spec.name().to_string(), spec.version().to_string());
    }
}

/// Check that `name` can name an environment file
pub fn validate_name(name: &str) -> TipResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && name.trim() == name;
    if !valid {
        return Err(TipError::Config(format!(
            "Invalid environment name '{}'",
            name
        )));
    }
    Ok(())
}

/// Whether `path` looks like an environment file
pub fn is_environment_file(path: &Path) -> bool {
    path.is_file()
        && path.extension().and_then(|e| e.to_str()) == Some(ENVIRONMENT_EXTENSION)
        && file_name_str(path).is_some_and(|n| !n.starts_with('.'))
}
