//! Service container for dependency injection

use super::traits::{ConfigProvider, EnvironmentRepository, PackageInstaller};
use crate::cache::Cache;
use crate::config::Config;
use crate::core::{TipError, TipResult};
use crate::environment::{Environment, FileEnvironmentRepository};
use crate::link::LinkSpace;
use crate::package::{ModuleLayout, PackageStore, PipInstaller};
use crate::resolver::Resolver;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the injectable services as `Arc<dyn Trait>` and builds the
/// components that depend on them (store, cache, link space, resolver) from
/// the resolved configuration.
///
/// # Example (Testing)
///
/// ```
/// use tip::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let temp = tempfile::tempdir().unwrap();
/// let container = ServiceContainer::with_providers(
///     Arc::new(MockConfigProvider::in_dir(temp.path())),
///     Arc::new(MockInstaller::new()),
///     Arc::new(MockEnvironmentRepository::new()),
/// );
/// assert!(!container.cache().is_enabled());
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub installer: Arc<dyn PackageInstaller>,
    pub environments: Arc<dyn EnvironmentRepository>,
    pub layout: ModuleLayout,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// Loads the config from the Tip home (creating a default one), installs
    /// through pip and stores environments as files.
    pub fn new() -> TipResult<Self> {
        let config = Config::load()?;
        let installer = PipInstaller::new(config.python());
        let environments = FileEnvironmentRepository::new(config.environments_dir());

        Ok(Self::with_providers(
            Arc::new(config),
            Arc::new(installer),
            Arc::new(environments),
        ))
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        installer: Arc<dyn PackageInstaller>,
        environments: Arc<dyn EnvironmentRepository>,
    ) -> Self {
        Self {
            config,
            installer,
            environments,
            layout: ModuleLayout::default(),
        }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the package installer
    pub fn installer(&self) -> &dyn PackageInstaller {
        self.installer.as_ref()
    }

    /// Get the environment repository
    pub fn environments(&self) -> &dyn EnvironmentRepository {
        self.environments.as_ref()
    }

    /// The cache configured for this Tip home
    pub fn cache(&self) -> Cache {
        Cache::new(self.config.cache_dir())
    }

    /// The shared link space
    pub fn link_space(&self) -> LinkSpace {
        LinkSpace::new(self.config.links_dir(), self.layout.clone())
    }

    /// The package store, mounting new installs into the link space
    pub fn store(&self) -> PackageStore {
        PackageStore::new(self.config.site_packages_dir(), self.cache())
            .with_links(self.link_space())
    }

    /// A resolver installing into `store()` through the configured installer
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.store(), Arc::clone(&self.installer))
    }

    /// Load the environment called `name`, or the active one
    pub fn load_environment(&self, name: Option<&str>) -> TipResult<Environment> {
        let name = self.environment_name(name)?;
        self.environments.load(&name)
    }

    /// `name` if given, else the active environment
    pub fn environment_name(&self, name: Option<&str>) -> TipResult<String> {
        match name {
            Some(name) => Ok(name.to_string()),
            None => self.config.active_environment().ok_or_else(|| {
                TipError::Config(
                    "No environment given and no active environment set".to_string(),
                )
            }),
        }
    }
}
