use crate::core::{TipError, TipResult};
use crate::redirect::{write_bootstrap, BootstrapManifest, ImportRedirector, ResolutionChain};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Environment variable the interpreter reads extra import paths from
const PYTHONPATH: &str = "PYTHONPATH";

/// What `tip run` executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    /// A source file
    Script(PathBuf),
    /// A module run as `__main__` (`-m`)
    Module(String),
    /// Source text (`-c`)
    Command(String),
}

impl RunTarget {
    /// Pick the target from `-m`, `-c` or the first positional argument
    ///
    /// Returns the target and the arguments passed on to it.
    pub fn from_args(
        module: Option<String>,
        command: Option<String>,
        mut args: Vec<String>,
    ) -> TipResult<(Self, Vec<String>)> {
        match (module, command) {
            (Some(_), Some(_)) => Err(TipError::Config(
                "At most one of -m or -c can be given".to_string(),
            )),
            (Some(module), None) => Ok((Self::Module(module), args)),
            (None, Some(command)) => Ok((Self::Command(command), args)),
            (None, None) if !args.is_empty() => {
                let script = args.remove(0);
                Ok((Self::Script(PathBuf::from(script)), args))
            }
            (None, None) => Err(TipError::Config(
                "Nothing to run: give a script, -m MODULE or -c COMMAND".to_string(),
            )),
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::Script(_) => "file",
            Self::Module(_) => "module",
            Self::Command(_) => "command",
        }
    }

    fn value(&self) -> OsString {
        match self {
            Self::Script(path) => path.clone().into_os_string(),
            Self::Module(name) => name.into(),
            Self::Command(source) => source.into(),
        }
    }
}

/// Options for running Python code
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory (defaults to the current one)
    pub cwd: Option<PathBuf>,
    /// Arguments passed to the script, module or command
    pub args: Vec<String>,
    /// Environment variables
    pub env: Vec<(String, String)>,
}

/// Runs Python with only the packages Tip makes visible
pub struct PythonRunner {
    python: String,
}

impl PythonRunner {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn python_path(&self) -> TipResult<PathBuf> {
        which::which(&self.python).map_err(|_| {
            TipError::Config(format!(
                "Python interpreter '{}' not found in PATH",
                self.python
            ))
        })
    }

    /// Run `target` seeing only the redirector's packages
    ///
    /// The redirector is registered at the front of the resolution chain for
    /// the duration of the run, and the mounted names are resolved through that
    /// chain. The interpreter starts without site-packages and a bootstrap
    /// installs a finder carrying those resolutions.
    /// Returns the child's exit code.
    pub fn run_in_environment(
        &self,
        redirector: Arc<ImportRedirector>,
        target: &RunTarget,
        options: &RunOptions,
    ) -> TipResult<i32> {
        let python = self.python_path()?;
        let mut chain = ResolutionChain::new();
        redirector.register(&mut chain);

        let scratch = tempfile::tempdir()?;
        let mounted = redirector.table().iter().map(|(name, _)| name);
        let manifest = BootstrapManifest::from_chain(&chain, mounted, redirector.fallback_dir());
        let files = write_bootstrap(scratch.path(), &manifest)?;

        let mut cmd = Command::new(&python);
        cmd.arg("-S")
            .arg("-B")
            .arg(&files.script)
            .arg(&files.manifest)
            .arg(target.mode())
            .arg(target.value())
            .args(&options.args);
        cmd.current_dir(options.cwd.as_deref().unwrap_or(redirector.fallback_dir()));
        for (key, value) in &options.env {
            cmd.env(key, value);
        }
        cmd.env_remove(PYTHONPATH);

        tracing::debug!(python = %python.display(), mode = target.mode(), modules = manifest.modules.len(), "running in environment");
        let status = cmd.status();
        redirector.unregister(&mut chain);
        Ok(status?.code().unwrap_or(1))
    }

    /// Run the interpreter with the link space in front of `PYTHONPATH`
    ///
    /// Every installed package is importable. `python_args` go to the
    /// interpreter unchanged.
    pub fn run_with_links(
        &self,
        links_dir: &Path,
        python_args: &[String],
        options: &RunOptions,
    ) -> TipResult<i32> {
        let python = self.python_path()?;

        let mut cmd = Command::new(&python);
        cmd.args(python_args);
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &options.env {
            cmd.env(key, value);
        }
        cmd.env(PYTHONPATH, python_path_with(links_dir)?);

        tracing::debug!(python = %python.display(), links = %links_dir.display(), "running with link space");
        let status = cmd.status()?;
        Ok(status.code().unwrap_or(1))
    }
}

/// `PYTHONPATH` with `dir` prepended to the inherited value
fn python_path_with(dir: &Path) -> TipResult<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = std::env::var_os(PYTHONPATH) {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).map_err(|e| TipError::Path(e.to_string()))
}
