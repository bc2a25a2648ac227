use crate::core::path::{
    config_file, default_cache_dir, ensure_dir, environments_dir, links_dir, site_packages_dir,
    tip_home,
};
use crate::core::{TipError, TipResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the cache directory.
pub const TIP_CACHE_DIR_ENV: &str = "TIP_CACHE_DIR";

/// Environment variable overriding the active environment.
pub const TIP_ACTIVE_ENV_ENV: &str = "TIP_ACTIVE_ENV";

/// Keys accepted by `tip config set|unset`
pub const CONFIG_KEYS: &[&str] = &[
    "site_packages_dir",
    "cache_dir",
    "links_dir",
    "active_environment",
    "python",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the config was loaded from; relative paths resolve against it
    #[serde(skip)]
    home: PathBuf,

    /// Store root holding `<name>/<version>/` installs (defaults to `<home>/site-packages`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_packages_dir: Option<String>,

    /// Cache root. The cache is disabled while this is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// Link space directory (defaults to `<home>/links`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links_dir: Option<String>,

    /// Environment used when a command is not given one explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_environment: Option<String>,

    /// Interpreter used by `tip run` and `tip python`
    #[serde(default = "default_python")]
    pub python: String,
}

fn default_python() -> String {
    "python3".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home: PathBuf::new(),
            site_packages_dir: None,
            cache_dir: None,
            links_dir: None,
            active_environment: None,
            python: default_python(),
        }
    }
}

impl Config {
    /// Load config from the Tip home, creating a default one if it doesn't exist
    pub fn load() -> TipResult<Self> {
        Self::load_from(&tip_home()?)
    }

    /// Load config from `<home>/config.yaml`, creating a default one if it doesn't exist
    pub fn load_from(home: &Path) -> TipResult<Self> {
        let config_path = config_file(home);

        if !config_path.exists() {
            let config = Self::with_home(home);
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| TipError::Config(format!("Failed to parse config: {}", e)))?;
        config.home = home.to_path_buf();

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// A default config rooted at `home`
    pub fn with_home(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            ..Default::default()
        }
    }

    /// Save config to `<home>/config.yaml`
    pub fn save(&self) -> TipResult<()> {
        ensure_dir(&self.home)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| TipError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_file(&self.home), content)?;
        Ok(())
    }

    /// Set a config key from its textual value
    pub fn set(&mut self, key: &str, value: &str) -> TipResult<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(TipError::Config(format!(
                "Value for '{}' must not be empty",
                key
            )));
        }
        let value = Some(value.to_string());
        match key {
            "site_packages_dir" => self.site_packages_dir = value,
            "cache_dir" => self.cache_dir = value,
            "links_dir" => self.links_dir = value,
            "active_environment" => self.active_environment = value,
            "python" => self.python = value.unwrap_or_else(default_python),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Reset a config key to its default
    pub fn unset(&mut self, key: &str) -> TipResult<()> {
        match key {
            "site_packages_dir" => self.site_packages_dir = None,
            "cache_dir" => self.cache_dir = None,
            "links_dir" => self.links_dir = None,
            "active_environment" => self.active_environment = None,
            "python" => self.python = default_python(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Platform cache directory, for suggesting a `cache_dir` value
    pub fn suggested_cache_dir() -> TipResult<PathBuf> {
        default_cache_dir()
    }

    fn resolve(&self, value: &str) -> PathBuf {
        let path = PathBuf::from(value);
        if path.is_absolute() {
            path
        } else {
            self.home.join(path)
        }
    }
}

fn unknown_key(key: &str) -> TipError {
    TipError::Config(format!(
        "Unknown config key '{}'. Expected one of: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ConfigProvider for Config {
    fn tip_home(&self) -> &Path {
        &self.home
    }

    fn site_packages_dir(&self) -> PathBuf {
        match self.site_packages_dir {
            Some(ref dir) => self.resolve(dir),
            None => site_packages_dir(&self.home),
        }
    }

    fn cache_dir(&self) -> Option<PathBuf> {
        non_empty_env(TIP_CACHE_DIR_ENV)
            .or_else(|| self.cache_dir.clone())
            .map(|dir| self.resolve(&dir))
    }

    fn links_dir(&self) -> PathBuf {
        match self.links_dir {
            Some(ref dir) => self.resolve(dir),
            None => links_dir(&self.home),
        }
    }

    fn environments_dir(&self) -> PathBuf {
        environments_dir(&self.home)
    }

    fn active_environment(&self) -> Option<String> {
        non_empty_env(TIP_ACTIVE_ENV_ENV).or_else(|| self.active_environment.clone())
    }

    fn python(&self) -> &str {
        &self.python
    }
}
