//! Transitive dependencies an environment doesn't list itself

use crate::environment::Environment;
use crate::package::{PackageSpecifier, PackageStore};
use std::collections::{HashSet, VecDeque};

/// Result of walking the dependency records of an environment's packages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyReport {
    /// Dependencies missing from the environment, in discovery order
    pub missing: Vec<PackageSpecifier>,
    /// Packages whose records couldn't be read, with the reason
    pub skipped: Vec<(PackageSpecifier, String)>,
}

/// Walk the dependency records of `environment`'s packages breadth-first
///
/// Packages that are not installed or have an unreadable record are reported
/// as skipped and their dependencies are not followed.
pub fn dependency_report(store: &PackageStore, environment: &Environment) -> DependencyReport {
    let roots = environment.specifiers();
    let mut seen: HashSet<PackageSpecifier> = roots.iter().cloned().collect();
    let mut queue: VecDeque<PackageSpecifier> = roots.into_iter().collect();
    let mut report = DependencyReport::default();

    while let Some(spec) = queue.pop_front() {
        let dependencies = match store.dependencies_of(&spec) {
            Ok(dependencies) => dependencies,
            Err(e) => {
                tracing::debug!(package = %spec, error = %e, "skipping dependencies");
                report.skipped.push((spec, e.to_string()));
                continue;
            }
        };
        for dependency in dependencies {
            if seen.insert(dependency.clone()) {
                report.missing.push(dependency.clone());
                queue.push_back(dependency);
            }
        }
    }
    report
}
