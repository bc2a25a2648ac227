//! pip-backed package installer

use crate::core::{TipError, TipResult};
use crate::di::PackageInstaller;
use crate::package::PackageSpecifier;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// File name of the dependency report pip writes during the dry run
const REPORT_FILE: &str = "dry-run-report.json";

/// Installs one package at a time with `pip`
///
/// The distribution is downloaded without dependencies, its dependency
/// closure is taken from a `pip install --dry-run --report` run, and the
/// package alone is installed into the target directory.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    python: String,
}

/// The parts of pip's installation report we read
#[derive(Debug, Deserialize)]
struct InstallReport {
    #[serde(default)]
    install: Vec<ReportItem>,
}

#[derive(Debug, Deserialize)]
struct ReportItem {
    metadata: ReportMetadata,
}

#[derive(Debug, Deserialize)]
struct ReportMetadata {
    name: String,
    version: String,
}

impl PipInstaller {
    /// Create an installer running pip through `python`
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Path of the interpreter, looked up on `PATH`
    pub fn python_path(&self) -> TipResult<PathBuf> {
        which::which(&self.python).map_err(|_| {
            TipError::Config(format!(
                "Python interpreter '{}' not found in PATH",
                self.python
            ))
        })
    }

    fn pip(&self, python: &Path, spec: &PackageSpecifier, args: &[&str]) -> TipResult<()> {
        tracing::debug!(package = %spec, ?args, "running pip");
        let output = Command::new(python)
            .args(["-m", "pip", "--disable-pip-version-check"])
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TipError::InstallFailed {
                spec: spec.to_string(),
                cause: format!("pip {} failed: {}", args[0], last_line(&stderr)),
            });
        }
        Ok(())
    }
}

impl PackageInstaller for PipInstaller {
    fn install(&self, spec: &PackageSpecifier, target: &Path) -> TipResult<Vec<String>> {
        let python = self.python_path()?;
        let scratch = tempfile::tempdir()?;
        let download_dir = scratch.path().join("download");
        fs::create_dir_all(&download_dir)?;

        let spec_text = spec.to_string();
        self.pip(
            &python,
            spec,
            &[
                "download",
                "--quiet",
                "--no-deps",
                "--dest",
                path_arg(&download_dir)?,
                &spec_text,
            ],
        )?;
        let distribution = downloaded_distribution(&download_dir, spec)?;
        let distribution_arg = path_arg(&distribution)?;

        let report_path = scratch.path().join(REPORT_FILE);
        self.pip(
            &python,
            spec,
            &[
                "install",
                "--quiet",
                "--dry-run",
                "--ignore-installed",
                "--report",
                path_arg(&report_path)?,
                distribution_arg,
            ],
        )?;
        let dependencies = read_report(&report_path, spec)?;

        self.pip(
            &python,
            spec,
            &[
                "install",
                "--quiet",
                "--no-deps",
                "--target",
                path_arg(target)?,
                distribution_arg,
            ],
        )?;

        Ok(dependencies)
    }
}

fn path_arg(path: &Path) -> TipResult<&str> {
    path.to_str()
        .ok_or_else(|| TipError::Path(format!("Non UTF-8 path {}", path.display())))
}

/// The single distribution file pip downloaded
fn downloaded_distribution(dir: &Path, spec: &PackageSpecifier) -> TipResult<PathBuf> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(TipError::InstallFailed {
        spec: spec.to_string(),
        cause: "pip download produced no distribution".to_string(),
    })
}

/// Dependencies of `spec` as pip resolved them, from an installation report
///
/// Every package in the report other than `spec` itself becomes a
/// `name==version` specifier.
fn read_report(path: &Path, spec: &PackageSpecifier) -> TipResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let report: InstallReport = serde_json::from_str(&content)
        .map_err(|e| TipError::corrupted(path, format!("invalid pip report: {}", e)))?;

    let own_name = normalize_name(spec.name());
    Ok(report
        .install
        .into_iter()
        .filter(|item| normalize_name(&item.metadata.name) != own_name)
        .map(|item| format!("{}=={}", item.metadata.name, item.metadata.version))
        .collect())
}

/// Distribution names compare case-insensitively with `-`, `_` and `.` equivalent
fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(['_', '.'], "-")
}

fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(str::trim)
        .unwrap_or("no output")
}
