//! Python adapter: hands the redirector's resolutions to a meta-path finder

use super::finder::{ImportRedirector, ModuleSpec, ResolutionChain};
use crate::core::TipResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Python program installed in front of `sys.meta_path` by `tip run`
///
/// argv: `<manifest.json> <file|module|command> <target> [args...]`
pub const BOOTSTRAP_SOURCE: &str = r#"import importlib.util
import json
import os
import runpy
import sys


class TipFinder:
    def __init__(self, manifest):
        self.modules = manifest["modules"]
        self.fallback_dir = manifest["fallback_dir"]

    def find_spec(self, fullname, path, target=None):
        entry = self.modules.get(fullname)
        if entry is None:
            if "." in fullname:
                return None
            entry = self._from_fallback(fullname)
            if entry is None:
                return None
        return importlib.util.spec_from_file_location(
            fullname,
            entry["origin"],
            submodule_search_locations=entry["search_locations"] or None,
        )

    def _from_fallback(self, name):
        package_dir = os.path.join(self.fallback_dir, name)
        initializer = os.path.join(package_dir, "__init__.py")
        if os.path.isfile(initializer):
            return {"origin": initializer, "search_locations": [package_dir]}
        module_file = os.path.join(self.fallback_dir, name + ".py")
        if os.path.isfile(module_file):
            return {"origin": module_file, "search_locations": []}
        return None

    def invalidate_caches(self):
        pass


def _main():
    with open(sys.argv[1]) as manifest_file:
        manifest = json.load(manifest_file)
    del sys.path[0]
    sys.meta_path.insert(0, TipFinder(manifest))
    sys.dont_write_bytecode = True
    mode, target, args = sys.argv[2], sys.argv[3], sys.argv[4:]
    if mode == "module":
        sys.argv = [target] + args
        runpy.run_module(target, run_name="__main__", alter_sys=True)
    elif mode == "command":
        sys.argv = ["-c"] + args
        exec(compile(target, "<string>", "exec"), {"__name__": "__main__"})
    else:
        sys.argv = [target] + args
        runpy.run_path(target, run_name="__main__")


_main()
"#;

/// Resolved modules and the fallback directory, as read by the bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapManifest {
    pub fallback_dir: PathBuf,
    pub modules: BTreeMap<String, ModuleSpec>,
}

impl BootstrapManifest {
    /// Resolve every mounted name of `redirector`
    pub fn from_redirector(redirector: &ImportRedirector) -> Self {
        let modules = redirector
            .resolve_mounted()
            .into_iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        Self {
            fallback_dir: redirector.fallback_dir().to_path_buf(),
            modules,
        }
    }

    /// Resolve each of `names` through `chain`
    ///
    /// Names no finder in the chain claims are left out.
    pub fn from_chain<'a>(
        chain: &ResolutionChain,
        names: impl IntoIterator<Item = &'a str>,
        fallback_dir: &Path,
    ) -> Self {
        let modules = names
            .into_iter()
            .filter_map(|name| chain.find_spec(name, None))
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        Self {
            fallback_dir: fallback_dir.to_path_buf(),
            modules,
        }
    }
}

/// Bootstrap script and manifest written to a scratch directory
pub struct BootstrapFiles {
    pub script: PathBuf,
    pub manifest: PathBuf,
}

/// Write the bootstrap program and `manifest` into `dir`
pub fn write_bootstrap(dir: &Path, manifest: &BootstrapManifest) -> TipResult<BootstrapFiles> {
    let script = dir.join("tip_bootstrap.py");
    let manifest_path = dir.join("tip_mounts.json");
    fs::write(&script, BOOTSTRAP_SOURCE)?;
    fs::write(&manifest_path, serde_json::to_string_pretty(manifest)?)?;
    Ok(BootstrapFiles {
        script,
        manifest: manifest_path,
    })
}
