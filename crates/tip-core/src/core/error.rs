use std::path::PathBuf;
use thiserror::Error;

pub type TipResult<T> = Result<T, TipError>;

#[derive(Error, Debug)]
pub enum TipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Text that is not of the form `name==version`.
    #[error("Malformed package specifier '{input}': expected '<name>==<version>'")]
    MalformedSpecifier { input: String },

    /// A specifier that failed validation while resolving dependencies.
    #[error("Invalid package specifier '{input}' encountered during resolution")]
    InvalidSpecifier { input: String },

    #[error("Package '{spec}' is not installed")]
    NotInstalled { spec: String },

    #[error("Package '{name}' is not in the environment")]
    NotPresent { name: String },

    #[error("'{}' already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("'{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("Package '{name}' is already in the environment with version {existing_version}")]
    VersionConflict {
        name: String,
        existing_version: String,
    },

    #[error("Cannot remove '{requested}': the environment has '{actual}'")]
    VersionMismatch { requested: String, actual: String },

    #[error("Failed to install '{spec}': {cause}")]
    InstallFailed { spec: String, cause: String },

    #[error("'{}' is corrupted: {reason}", path.display())]
    Corrupted { path: PathBuf, reason: String },

    #[error("Cache is disabled")]
    CacheDisabled,

    /// A subprocess exited with a non-zero status code.
    /// The exit code should be propagated to the shell.
    #[error("Command exited with code {0}")]
    SubprocessExit(i32),
}

impl TipError {
    /// Shorthand for a `Corrupted` error.
    pub fn corrupted(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TipError::Corrupted {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
