//! Integration tests module
//!
//! These drive the library through a `ServiceContainer` wired with the mock
//! installer, so no network is needed. Only the `run` tests start an
//! interpreter, and they skip themselves without one.

pub mod install;
pub mod redirect;
pub mod run;
pub mod uninstall;
