pub mod dependency_report;
pub mod dependency_resolver;

pub use dependency_report::{dependency_report, DependencyReport};
pub use dependency_resolver::{Resolution, Resolver};
