//! Dependency injection infrastructure for Tip
//!
//! Configuration, the external installer and environment storage are reached
//! through traits so resolution logic can be tested without pip or a real
//! Tip home.
//!
//! # Example (Production)
//! ```no_run
//! use tip::di::ServiceContainer;
//!
//! # fn example() -> tip::core::TipResult<()> {
//! let container = ServiceContainer::new()?;
//! let store = container.store();
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use tip::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let installer = Arc::new(MockInstaller::new());
//! let environments = Arc::new(MockEnvironmentRepository::new());
//!
//! let container = ServiceContainer::with_providers(config, installer, environments);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ConfigProvider, EnvironmentRepository, PackageInstaller};
