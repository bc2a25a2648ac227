pub mod installer;
pub mod layout;
pub mod sidecar;
pub mod store;

// The specifier lives in tip-core, re-export it where packages are handled
pub mod specifier {
    pub use tip_core::package::specifier::*;
}

pub use installer::PipInstaller;
pub use layout::{ImportableUnit, ModuleLayout, ModuleShape};
pub use specifier::PackageSpecifier;
pub use store::{InstallOutcome, PackageStore};
