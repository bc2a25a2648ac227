use tip::core::{TipError, TipResult};
use tip::di::ServiceContainer;
use tip::path_setup::{PythonRunner, RunOptions};

/// Run the interpreter with every installed package importable
pub fn run(container: &ServiceContainer, args: Vec<String>) -> TipResult<()> {
    let runner = PythonRunner::new(container.config().python());
    let exit_code =
        runner.run_with_links(&container.config().links_dir(), &args, &RunOptions::default())?;
    if exit_code != 0 {
        return Err(TipError::SubprocessExit(exit_code));
    }
    Ok(())
}
