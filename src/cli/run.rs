use std::sync::Arc;
use tip::core::{TipError, TipResult};
use tip::di::ServiceContainer;
use tip::path_setup::{PythonRunner, RunOptions, RunTarget};
use tip::redirect::{ImportRedirector, MountTable};

pub struct RunArgs {
    pub module: Option<String>,
    pub command: Option<String>,
    pub env: Option<String>,
    pub install_missing: bool,
    pub args: Vec<String>,
}

/// Run a script, module or command seeing only one environment's packages
pub fn run(container: &ServiceContainer, run_args: RunArgs) -> TipResult<()> {
    let (target, args) = RunTarget::from_args(run_args.module, run_args.command, run_args.args)?;
    let environment = container.load_environment(run_args.env.as_deref())?;

    if run_args.install_missing {
        let resolution = container
            .resolver()
            .resolve_environment(&[], &environment, &mut |spec| {
                eprintln!("Installing {}", spec)
            })?;
        tracing::info!(installed = resolution.installed.len(), "installed missing packages");
    }

    let table = MountTable::from_environment(&environment, &container.store(), &container.layout)?;
    let redirector = Arc::new(ImportRedirector::new(table, container.layout.clone()));

    let runner = PythonRunner::new(container.config().python());
    let options = RunOptions {
        args,
        ..Default::default()
    };
    let exit_code = runner.run_in_environment(redirector, &target, &options)?;
    if exit_code != 0 {
        return Err(TipError::SubprocessExit(exit_code));
    }
    Ok(())
}
