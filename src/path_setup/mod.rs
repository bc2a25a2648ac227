//! Running Python against Tip-managed packages

pub mod runner;

pub use runner::{PythonRunner, RunOptions, RunTarget};
