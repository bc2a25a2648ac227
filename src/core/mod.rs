//! Core module re-exports.
//!
//! The error type, error help and path helpers live in `tip-core`.

pub use tip_core::core::{error, error_help, path};
pub use tip_core::{format_error_with_help, ErrorHelp, TipError, TipResult};
