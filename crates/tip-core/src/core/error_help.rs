//! Human-friendly rendering of errors for the CLI.

use crate::core::error::TipError;

/// A suggestion attached to an error when printed to the user.
pub trait ErrorHelp {
    /// A short follow-up action, if one applies.
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for TipError {
    fn help(&self) -> Option<String> {
        match self {
            TipError::MalformedSpecifier { .. } | TipError::InvalidSpecifier { .. } => {
                Some("Packages are written as <name>==<version>, e.g. requests==2.31.0".to_string())
            }
            TipError::NotInstalled { spec } => Some(format!(
                "Run `tip install {}` or pass --install-missing to `tip run`",
                spec
            )),
            TipError::NotPresent { .. } => {
                Some("Use `tip list` to see the packages of the environment".to_string())
            }
            TipError::AlreadyExists { .. } => {
                Some("Pick another name or delete the existing environment first".to_string())
            }
            TipError::NotFound { .. } => {
                Some("Create it with `tip create <name>` or check `tip info`".to_string())
            }
            TipError::VersionConflict { .. } => {
                Some("Pass --replace to switch the environment to the new version".to_string())
            }
            TipError::VersionMismatch { actual, .. } => {
                Some(format!("Remove '{}' instead", actual))
            }
            TipError::InstallFailed { .. } => {
                Some("Check the package name, version and your network connection".to_string())
            }
            TipError::Corrupted { path, .. } => Some(format!(
                "Delete or repair {} and run the command again",
                path.display()
            )),
            TipError::CacheDisabled => {
                Some("Enable it with `tip config set cache_dir <path>`".to_string())
            }
            TipError::Config(_) => {
                Some("Known keys: site_packages_dir, cache_dir, links_dir, active_environment, python".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error together with its help line.
pub fn format_error_with_help(error: &TipError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}
