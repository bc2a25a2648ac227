//! Tip core utilities
//!
//! Leaf pieces shared by every part of Tip: the error type, user-facing
//! error help, platform paths and the `name==version` package specifier.

pub mod core;
pub mod package;

pub use crate::core::error::{TipError, TipResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
pub use crate::package::specifier::PackageSpecifier;
