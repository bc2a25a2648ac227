pub mod specifier;

pub use specifier::PackageSpecifier;
