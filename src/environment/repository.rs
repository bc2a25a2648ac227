//! File-backed environment storage

use super::{is_environment_file, Environment, ENVIRONMENT_EXTENSION};
use crate::core::{TipError, TipResult};
use crate::di::EnvironmentRepository;
use std::fs;
use std::path::PathBuf;

/// Stores each environment as `<dir>/<name>.json`
#[derive(Debug, Clone)]
pub struct FileEnvironmentRepository {
    dir: PathBuf,
}

impl FileEnvironmentRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl EnvironmentRepository for FileEnvironmentRepository {
    fn locate(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, ENVIRONMENT_EXTENSION))
    }

    fn exists(&self, name: &str) -> bool {
        self.locate(name).is_file()
    }

    fn load(&self, name: &str) -> TipResult<Environment> {
        Environment::load(&self.locate(name))
    }

    fn save(&self, environment: &Environment, rewrite: bool) -> TipResult<()> {
        environment.save(&self.locate(environment.name()), rewrite)
    }

    fn delete(&self, name: &str) -> TipResult<()> {
        let path = self.locate(name);
        if !path.is_file() {
            return Err(TipError::NotFound { path });
        }
        fs::remove_file(&path)?;
        tracing::info!(environment = name, "deleted environment");
        Ok(())
    }

    fn list(&self) -> TipResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !is_environment_file(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
