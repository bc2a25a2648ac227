//! Tip: exact-version package management for Python without global installs
//!
//! Every `name==version` is installed once into its own directory. Named
//! environments pick exact versions, and a run sees only the packages of its
//! environment. The leaf types (errors, paths, the package specifier) come
//! from `tip-core`.

pub use tip_core::{format_error_with_help, ErrorHelp, PackageSpecifier, TipError, TipResult};

/// Core module re-exported from tip-core.
pub mod core;

/// Configuration management.
pub mod config;

/// Package cache mirroring installed packages.
pub mod cache;

/// Package store, dependency records and the pip installer.
pub mod package;

/// Shared directory of links to installed modules.
pub mod link;

/// Named sets of exact package versions.
pub mod environment;

/// Dependency resolution.
pub mod resolver;

/// Run-time import redirection.
pub mod redirect;

/// Python runner.
pub mod path_setup;

/// Dependency injection infrastructure.
pub mod di;
