//! Run-time import redirection for one environment
//!
//! The redirector maps top-level module names to the package directories of
//! one environment and resolves lookups against them. The Python adapter in
//! `bootstrap` carries its resolutions into the interpreter.

pub mod bootstrap;
pub mod finder;
pub mod mount_table;

pub use bootstrap::{write_bootstrap, BootstrapManifest};
pub use finder::{FinderId, ImportRedirector, ModuleFinder, ModuleSpec, ResolutionChain};
pub use mount_table::MountTable;
