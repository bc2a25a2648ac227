use tip::config::Config;
use tip::core::{TipError, TipResult};
use tip::di::ServiceContainer;

/// Make `name` the environment used when commands aren't given one
pub fn run(container: &ServiceContainer, name: String) -> TipResult<()> {
    if !container.environments().exists(&name) {
        return Err(TipError::NotFound {
            path: container.environments().locate(&name),
        });
    }

    let mut config = Config::load_from(container.config().tip_home())?;
    config.set("active_environment", &name)?;
    config.save()?;

    println!("✓ Activated environment '{}'", name);
    Ok(())
}
