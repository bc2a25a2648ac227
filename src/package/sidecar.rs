//! The per-package `dependencies.json` record

use crate::core::{TipError, TipResult};
use crate::package::PackageSpecifier;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the dependency record inside an installed package
pub const SIDECAR_FILE: &str = "dependencies.json";

/// On-disk shapes accepted for the record
#[derive(Deserialize)]
#[serde(untagged)]
enum SidecarContent {
    List(Vec<String>),
    /// Older installs wrote `{}` for "no dependencies"
    Map(serde_json::Map<String, serde_json::Value>),
}

/// Path of the record inside `package_dir`
pub fn sidecar_path(package_dir: &Path) -> PathBuf {
    package_dir.join(SIDECAR_FILE)
}

/// Write the dependency list discovered at install time
pub fn write(package_dir: &Path, dependencies: &[String]) -> TipResult<()> {
    let content = serde_json::to_string(dependencies)?;
    fs::write(sidecar_path(package_dir), content)?;
    Ok(())
}

/// Read the dependency list of an installed package
///
/// Missing or unparsable records are `Corrupted`.
pub fn read(package_dir: &Path) -> TipResult<Vec<PackageSpecifier>> {
    let path = sidecar_path(package_dir);
    let content = fs::read_to_string(&path)
        .map_err(|e| TipError::corrupted(&path, format!("cannot read dependency record: {}", e)))?;
    let parsed: SidecarContent = serde_json::from_str(&content)
        .map_err(|e| TipError::corrupted(&path, format!("invalid dependency record: {}", e)))?;

    match parsed {
        SidecarContent::List(items) => items
            .iter()
            .map(|item| {
                PackageSpecifier::parse(item).map_err(|_| {
                    TipError::corrupted(&path, format!("invalid dependency '{}'", item))
                })
            })
            .collect(),
        SidecarContent::Map(map) if map.is_empty() => Ok(Vec::new()),
        SidecarContent::Map(_) => Err(TipError::corrupted(
            &path,
            "expected a list of dependency specifiers",
        )),
    }
}
