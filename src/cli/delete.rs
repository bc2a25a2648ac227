use dialoguer::Confirm;
use tip::config::Config;
use tip::core::{TipError, TipResult};
use tip::di::ServiceContainer;

/// Delete an environment file; installed packages stay in the store
pub fn run(container: &ServiceContainer, name: String, yes: bool) -> TipResult<()> {
    let environments = container.environments();
    if !environments.exists(&name) {
        return Err(TipError::NotFound {
            path: environments.locate(&name),
        });
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete environment '{}'?", name))
            .default(false)
            .interact()
            .map_err(|e| TipError::Config(format!("Failed to read input: {}", e)))?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    environments.delete(&name)?;

    let mut config = Config::load_from(container.config().tip_home())?;
    if config.active_environment.as_deref() == Some(name.as_str()) {
        config.active_environment = None;
        config.save()?;
        println!("  '{}' is no longer the active environment", name);
    }

    println!("✓ Deleted environment '{}'", name);
    Ok(())
}
