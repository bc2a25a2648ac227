//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, EnvironmentRepository, PackageInstaller};
use crate::core::{TipError, TipResult};
use crate::environment::Environment;
use crate::package::PackageSpecifier;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use tip::di::mocks::MockConfigProvider;
/// use tip::di::ConfigProvider;
/// use std::path::Path;
///
/// let config = MockConfigProvider::in_dir(Path::new("/tmp/tip-test"));
/// assert_eq!(config.site_packages_dir(), Path::new("/tmp/tip-test/site-packages"));
/// assert!(config.cache_dir().is_none());
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub home: PathBuf,
    pub site_packages_dir: PathBuf,
    pub cache_dir: Option<PathBuf>,
    pub links_dir: PathBuf,
    pub environments_dir: PathBuf,
    pub active_environment: Option<String>,
    pub python: String,
}

impl MockConfigProvider {
    /// Every directory under `home`, cache disabled
    pub fn in_dir(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            site_packages_dir: home.join("site-packages"),
            cache_dir: None,
            links_dir: home.join("links"),
            environments_dir: home.join("environments"),
            active_environment: None,
            python: "python3".to_string(),
        }
    }
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self::in_dir(Path::new("/tmp/tip-test"))
    }
}

impl ConfigProvider for MockConfigProvider {
    fn tip_home(&self) -> &Path {
        &self.home
    }

    fn site_packages_dir(&self) -> PathBuf {
        self.site_packages_dir.clone()
    }

    fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone()
    }

    fn links_dir(&self) -> PathBuf {
        self.links_dir.clone()
    }

    fn environments_dir(&self) -> PathBuf {
        self.environments_dir.clone()
    }

    fn active_environment(&self) -> Option<String> {
        self.active_environment.clone()
    }

    fn python(&self) -> &str {
        &self.python
    }
}

#[derive(Default)]
struct MockIndex {
    /// Dependencies and files of every known package, by specifier
    packages: HashMap<String, MockPackage>,
    /// Causes of injected failures, by specifier
    failures: HashMap<String, String>,
    /// Specifiers in the order they were installed
    calls: Vec<String>,
}

#[derive(Clone)]
struct MockPackage {
    dependencies: Vec<String>,
    files: Vec<(String, String)>,
}

/// Mock installer backed by an in-memory package index
///
/// Known packages get a `<name>/__init__.py` file (or the files given to
/// `add_package_with_files`) and report their configured dependencies.
/// Unknown packages and injected failures fail the install.
///
/// # Example
///
/// ```
/// use tip::di::mocks::MockInstaller;
/// use tip::di::PackageInstaller;
/// use tip::package::PackageSpecifier;
///
/// let installer = MockInstaller::new();
/// installer.add_package("app==1.0", &["lib==2.0"]);
///
/// let target = tempfile::tempdir().unwrap();
/// let spec = PackageSpecifier::parse("app==1.0").unwrap();
/// let deps = installer.install(&spec, target.path()).unwrap();
/// assert_eq!(deps, ["lib==2.0"]);
/// assert!(target.path().join("app/__init__.py").exists());
/// ```
#[derive(Clone, Default)]
pub struct MockInstaller {
    index: Arc<Mutex<MockIndex>>,
}

impl MockInstaller {
    /// Create an installer that knows no packages
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package providing a package directory named after it
    pub fn add_package(&self, spec: &str, dependencies: &[&str]) {
        let version = spec.split("==").nth(1).unwrap_or_default();
        let module = module_name(spec);
        let files = vec![(
            format!("{}/__init__.py", module),
            format!("__version__ = \"{}\"\n", version),
        )];
        self.add_package_with_files(spec, dependencies, &files);
    }

    /// Register a package with explicit file contents, paths relative to the target
    pub fn add_package_with_files(
        &self,
        spec: &str,
        dependencies: &[&str],
        files: &[(String, String)],
    ) {
        let package = MockPackage {
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            files: files.to_vec(),
        };
        self.index
            .lock()
            .unwrap()
            .packages
            .insert(spec.to_string(), package);
    }

    /// Make installing `spec` fail with `cause`
    pub fn fail_on(&self, spec: &str, cause: &str) {
        self.index
            .lock()
            .unwrap()
            .failures
            .insert(spec.to_string(), cause.to_string());
    }

    /// Every install call, in order
    pub fn calls(&self) -> Vec<String> {
        self.index.lock().unwrap().calls.clone()
    }

    /// How many times `spec` was installed
    pub fn install_count(&self, spec: &str) -> usize {
        self.index
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == spec)
            .count()
    }
}

/// `app-utils==1.0` provides the `app_utils` module
fn module_name(spec: &str) -> String {
    spec.split("==")
        .next()
        .unwrap_or_default()
        .replace('-', "_")
}

impl PackageInstaller for MockInstaller {
    fn install(&self, spec: &PackageSpecifier, target: &Path) -> TipResult<Vec<String>> {
        let key = spec.to_string();
        let package = {
            let mut index = self.index.lock().unwrap();
            index.calls.push(key.clone());
            if let Some(cause) = index.failures.get(&key) {
                return Err(TipError::InstallFailed {
                    spec: key,
                    cause: cause.clone(),
                });
            }
            index.packages.get(&key).cloned()
        };

        let package = package.ok_or_else(|| TipError::InstallFailed {
            spec: key.clone(),
            cause: "no matching distribution found".to_string(),
        })?;

        for (relative, content) in &package.files {
            let path = target.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        Ok(package.dependencies)
    }
}

/// In-memory environment storage
#[derive(Clone, Default)]
pub struct MockEnvironmentRepository {
    environments: Arc<Mutex<BTreeMap<String, Environment>>>,
}

impl MockEnvironmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an environment directly
    pub fn insert(&self, environment: Environment) {
        self.environments
            .lock()
            .unwrap()
            .insert(environment.name().to_string(), environment);
    }
}

impl EnvironmentRepository for MockEnvironmentRepository {
    fn locate(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("/mock/environments/{}.json", name))
    }

    fn exists(&self, name: &str) -> bool {
        self.environments.lock().unwrap().contains_key(name)
    }

    fn load(&self, name: &str) -> TipResult<Environment> {
        self.environments
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| TipError::NotFound {
                path: self.locate(name),
            })
    }

    fn save(&self, environment: &Environment, rewrite: bool) -> TipResult<()> {
        let mut environments = self.environments.lock().unwrap();
        if environments.contains_key(environment.name()) && !rewrite {
            return Err(TipError::AlreadyExists {
                path: self.locate(environment.name()),
            });
        }
        environments.insert(environment.name().to_string(), environment.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> TipResult<()> {
        self.environments
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TipError::NotFound {
                path: self.locate(name),
            })
    }

    fn list(&self) -> TipResult<Vec<String>> {
        Ok(self.environments.lock().unwrap().keys().cloned().collect())
    }
}
