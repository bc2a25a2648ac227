//! Breadth-first transitive install

use crate::core::{TipError, TipResult};
use crate::di::PackageInstaller;
use crate::environment::Environment;
use crate::package::{InstallOutcome, PackageSpecifier, PackageStore};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// What a resolution did, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Packages the installer ran for
    pub installed: Vec<PackageSpecifier>,
    /// Packages that were already installed
    pub skipped: Vec<PackageSpecifier>,
}

impl Resolution {
    /// Number of distinct packages visited
    pub fn visited(&self) -> usize {
        self.installed.len() + self.skipped.len()
    }
}

/// Expands a set of specifiers into its transitive closure and installs it
///
/// Every distinct `name==version` is processed at most once, so cyclic,
/// diamond and self-referencing dependency graphs terminate. An installed
/// package is skipped without reading its dependencies. The first install
/// failure aborts the whole resolution.
pub struct Resolver {
    store: PackageStore,
    installer: Arc<dyn PackageInstaller>,
}

impl Resolver {
    pub fn new(store: PackageStore, installer: Arc<dyn PackageInstaller>) -> Self {
        Self { store, installer }
    }

    pub fn store(&self) -> &PackageStore {
        &self.store
    }

    /// Install the closure of `seed`
    pub fn resolve(&self, seed: &[String]) -> TipResult<Resolution> {
        self.resolve_with(seed, &mut |_| {})
    }

    /// Install the closure of `requested`, or of every package of `environment` if empty
    pub fn resolve_environment(
        &self,
        requested: &[String],
        environment: &Environment,
        on_install: &mut dyn FnMut(&PackageSpecifier),
    ) -> TipResult<Resolution> {
        if !requested.is_empty() {
            return self.resolve_with(requested, on_install);
        }
        let seed: Vec<String> = environment
            .specifiers()
            .iter()
            .map(PackageSpecifier::format)
            .collect();
        self.resolve_with(&seed, on_install)
    }

    /// Install the closure of `seed`, calling `on_install` before each install
    pub fn resolve_with(
        &self,
        seed: &[String],
        on_install: &mut dyn FnMut(&PackageSpecifier),
    ) -> TipResult<Resolution> {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        for text in seed {
            if seen.insert(text.clone()) {
                queue.push_back(text.clone());
            }
        }

        let mut resolution = Resolution::default();
        while let Some(text) = queue.pop_front() {
            let spec = PackageSpecifier::parse(&text)
                .map_err(|_| TipError::InvalidSpecifier { input: text.clone() })?;

            if self.store.is_installed(&spec) {
                tracing::debug!(package = %spec, "already installed, skipping");
                resolution.skipped.push(spec);
                continue;
            }

            on_install(&spec);
            match self.store.install(&spec, self.installer.as_ref())? {
                InstallOutcome::AlreadyInstalled => resolution.skipped.push(spec),
                InstallOutcome::Installed { dependencies } => {
                    for dependency in dependencies {
                        if seen.insert(dependency.clone()) {
                            queue.push_back(dependency);
                        }
                    }
                    resolution.installed.push(spec);
                }
            }
            tracing::debug!(queued = queue.len(), "resolver progress");
        }

        tracing::info!(
            installed = resolution.installed.len(),
            skipped = resolution.skipped.len(),
            "resolution finished"
        );
        Ok(resolution)
    }
}
