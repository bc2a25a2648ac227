//! What counts as an importable unit inside a package directory

use crate::core::path::file_name_str;
use crate::core::TipResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Shape of an importable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleShape {
    /// A directory containing the initializer file; sub-lookups are scoped to it
    Package,
    /// A single source file
    Module,
}

/// One top-level importable unit of an installed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportableUnit {
    /// Import name (file name without the source extension)
    pub name: String,
    /// Directory or file on disk
    pub path: PathBuf,
    pub shape: ModuleShape,
}

/// Naming conventions of the target language's modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    /// File that marks a directory as a package
    pub initializer: String,
    /// Extension of source modules, without the dot
    pub extension: String,
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self::python()
    }
}

impl ModuleLayout {
    pub fn python() -> Self {
        Self {
            initializer: "__init__.py".to_string(),
            extension: "py".to_string(),
        }
    }

    /// Shape of `path` if it is importable
    pub fn shape(&self, path: &Path) -> Option<ModuleShape> {
        if path.is_dir() {
            path.join(&self.initializer)
                .is_file()
                .then_some(ModuleShape::Package)
        } else if path.is_file() && self.has_source_extension(path) {
            Some(ModuleShape::Module)
        } else {
            None
        }
    }

    /// Import name of an importable path
    pub fn import_name(&self, path: &Path, shape: ModuleShape) -> Option<String> {
        match shape {
            ModuleShape::Package => file_name_str(path).map(str::to_string),
            ModuleShape::Module => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string),
        }
    }

    /// File name of a source module called `name`
    pub fn module_file_name(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension)
    }

    /// Every importable unit directly inside `package_dir`, sorted by name
    pub fn top_level_units(&self, package_dir: &Path) -> TipResult<Vec<ImportableUnit>> {
        let mut units = Vec::new();
        for entry in fs::read_dir(package_dir)? {
            let path = entry?.path();
            let Some(shape) = self.shape(&path) else {
                continue;
            };
            if let Some(name) = self.import_name(&path, shape) {
                units.push(ImportableUnit { name, path, shape });
            }
        }
        units.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(units)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}
