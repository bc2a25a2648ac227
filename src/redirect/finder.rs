use super::mount_table::MountTable;
use crate::core::path::is_single_segment;
use crate::package::{ModuleLayout, ModuleShape};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Where a module resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSpec {
    /// Full dotted module name
    pub name: String,
    /// File that is executed to create the module
    pub origin: PathBuf,
    /// Directories sub-lookups are scoped to; empty for plain modules
    pub search_locations: Vec<PathBuf>,
    #[serde(skip)]
    pub shape: ModuleShape,
}

/// A resolution strategy consulted for each module lookup
pub trait ModuleFinder: Send + Sync {
    /// Resolve `fullname`, or decline with `None`
    ///
    /// `parent_locations` holds the parent package's search locations when
    /// `fullname` is dotted.
    fn find_spec(&self, fullname: &str, parent_locations: Option<&[PathBuf]>)
        -> Option<ModuleSpec>;
}

/// Identifies a finder registered in a `ResolutionChain`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinderId(u64);

static NEXT_FINDER_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered finders, consulted front to back until one resolves a name
#[derive(Default)]
pub struct ResolutionChain {
    finders: Vec<(FinderId, Arc<dyn ModuleFinder>)>,
}

impl ResolutionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finder consulted after the ones already registered
    pub fn push(&mut self, finder: Arc<dyn ModuleFinder>) -> FinderId {
        let id = FinderId(NEXT_FINDER_ID.fetch_add(1, Ordering::Relaxed));
        self.finders.push((id, finder));
        id
    }

    /// Add a finder consulted before every other one
    pub fn insert_front(&mut self, finder: Arc<dyn ModuleFinder>) -> FinderId {
        let id = FinderId(NEXT_FINDER_ID.fetch_add(1, Ordering::Relaxed));
        self.finders.insert(0, (id, finder));
        id
    }

    /// Remove a finder; returns whether it was registered
    pub fn remove(&mut self, id: FinderId) -> bool {
        let before = self.finders.len();
        self.finders.retain(|(finder_id, _)| *finder_id != id);
        self.finders.len() != before
    }

    pub fn len(&self) -> usize {
        self.finders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }

    /// Position of a finder, front is 0
    pub fn position(&self, id: FinderId) -> Option<usize> {
        self.finders.iter().position(|(finder_id, _)| *finder_id == id)
    }

    /// First resolution any finder produces
    pub fn find_spec(&self, fullname: &str, parent_locations: Option<&[PathBuf]>) -> Option<ModuleSpec> {
        self.finders
            .iter()
            .find_map(|(_, finder)| finder.find_spec(fullname, parent_locations))
    }
}

/// Resolves the top-level names of a mount table against their package directories
///
/// Names missing from the table resolve against the fallback directory (the
/// working directory by default). Sub-lookups of a package are scoped to that
/// package's directory. The redirector starts unregistered and is consulted
/// only once registered at the front of a `ResolutionChain`.
pub struct ImportRedirector {
    table: MountTable,
    fallback_dir: PathBuf,
    layout: ModuleLayout,
    /// Id in the chain while registered, 0 otherwise
    registration: AtomicU64,
}

impl ImportRedirector {
    /// A redirector falling back to the current working directory
    pub fn new(table: MountTable, layout: ModuleLayout) -> Self {
        let fallback_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_fallback_dir(table, layout, fallback_dir)
    }

    pub fn with_fallback_dir(table: MountTable, layout: ModuleLayout, fallback_dir: PathBuf) -> Self {
        Self {
            table,
            fallback_dir,
            layout,
            registration: AtomicU64::new(0),
        }
    }

    pub fn table(&self) -> &MountTable {
        &self.table
    }

    pub fn fallback_dir(&self) -> &Path {
        &self.fallback_dir
    }

    pub fn is_registered(&self) -> bool {
        self.registration.load(Ordering::SeqCst) != 0
    }

    /// Insert the redirector at the front of `chain`
    ///
    /// Returns false if it was already registered.
    pub fn register(self: &Arc<Self>, chain: &mut ResolutionChain) -> bool {
        if self.is_registered() {
            return false;
        }
        let finder: Arc<dyn ModuleFinder> = Arc::clone(self) as Arc<dyn ModuleFinder>;
        let FinderId(id) = chain.insert_front(finder);
        self.registration.store(id, Ordering::SeqCst);
        tracing::debug!(modules = self.table.len(), "registered import redirector");
        true
    }

    /// Remove the redirector from `chain`
    ///
    /// Returns false if it was not registered.
    pub fn unregister(&self, chain: &mut ResolutionChain) -> bool {
        let id = self.registration.swap(0, Ordering::SeqCst);
        if id == 0 {
            return false;
        }
        chain.remove(FinderId(id));
        tracing::debug!("unregistered import redirector");
        true
    }

    /// Resolve every mounted top-level name
    pub fn resolve_mounted(&self) -> Vec<ModuleSpec> {
        self.table
            .iter()
            .filter_map(|(name, _)| self.find_spec(name, None))
            .collect()
    }

    /// Look up `name` as a package directory or a source file inside `dir`
    fn find_in(&self, fullname: &str, name: &str, dir: &Path) -> Option<ModuleSpec> {
        let package_dir = dir.join(name);
        if self.layout.shape(&package_dir) == Some(ModuleShape::Package) {
            return Some(ModuleSpec {
                name: fullname.to_string(),
                origin: package_dir.join(&self.layout.initializer),
                search_locations: vec![package_dir],
                shape: ModuleShape::Package,
            });
        }
        let module_file = dir.join(self.layout.module_file_name(name));
        if self.layout.shape(&module_file) == Some(ModuleShape::Module) {
            return Some(ModuleSpec {
                name: fullname.to_string(),
                origin: module_file,
                search_locations: Vec::new(),
                shape: ModuleShape::Module,
            });
        }
        None
    }
}

impl ModuleFinder for ImportRedirector {
    fn find_spec(&self, fullname: &str, parent_locations: Option<&[PathBuf]>) -> Option<ModuleSpec> {
        // Every dotted component must name a single directory entry.
        if !fullname.split('.').all(is_single_segment) {
            return None;
        }
        let (top, rest) = match fullname.split_once('.') {
            Some((top, rest)) => (top, Some(rest)),
            None => (fullname, None),
        };
        let root = self.table.get(top).unwrap_or(self.fallback_dir.as_path());

        let Some(rest) = rest else {
            return self.find_in(fullname, top, root);
        };

        // Sub-lookups stay inside the top-level package's directory.
        let package_root = root.join(top);
        let (parents, leaf) = match rest.rsplit_once('.') {
            Some((middle, leaf)) => (Some(middle), leaf),
            None => (None, rest),
        };
        let default_dir = match parents {
            Some(middle) => middle.split('.').fold(package_root.clone(), |dir, part| dir.join(part)),
            None => package_root.clone(),
        };

        let candidates: Vec<PathBuf> = match parent_locations {
            Some(locations) => locations
                .iter()
                .filter(|location| location.starts_with(&package_root))
                .cloned()
                .collect(),
            None => vec![default_dir],
        };
        candidates
            .iter()
            .find_map(|dir| self.find_in(fullname, leaf, dir))
    }
}
