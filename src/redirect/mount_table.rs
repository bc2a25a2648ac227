use crate::core::{TipError, TipResult};
use crate::environment::Environment;
use crate::package::{ModuleLayout, PackageStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level module name to the directory that provides it, for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountTable {
    entries: BTreeMap<String, PathBuf>,
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `name` to `dir`, returning the directory it previously mapped to
    pub fn insert(&mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Option<PathBuf> {
        self.entries.insert(name.into(), dir.into())
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by module name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, dir)| (name.as_str(), dir.as_path()))
    }

    /// Mount every importable unit of every package in `environment`
    ///
    /// Each unit maps to its package's directory, read through the store's
    /// cache. Fails with `NotInstalled` for the first package that isn't.
    pub fn from_environment(
        environment: &Environment,
        store: &PackageStore,
        layout: &ModuleLayout,
    ) -> TipResult<Self> {
        let mut table = Self::new();
        for spec in environment.specifiers() {
            let package_dir = store.locate_spec(&spec)?;
            if !package_dir.is_dir() {
                return Err(TipError::NotInstalled {
                    spec: spec.to_string(),
                });
            }
            let mounted_dir = store.cache().get(&package_dir)?;
            for unit in layout.top_level_units(&mounted_dir)? {
                if let Some(previous) = table.insert(unit.name.clone(), mounted_dir.clone()) {
                    tracing::warn!(
                        module = %unit.name,
                        previous = %previous.display(),
                        package = %spec,
                        "module provided by more than one package, last one wins"
                    );
                }
            }
        }
        tracing::debug!(
            environment = environment.name(),
            modules = table.len(),
            "built mount table"
        );
        Ok(table)
    }
}

impl FromIterator<(String, PathBuf)> for MountTable {
    fn from_iter<I: IntoIterator<Item = (String, PathBuf)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
