use tip::core::TipResult;
use tip::di::ServiceContainer;
use tip::environment::{validate_name, Environment};

/// Create an empty environment, refusing to overwrite an existing one
pub fn run(container: &ServiceContainer, name: String) -> TipResult<()> {
    validate_name(&name)?;
    container.environments().save(&Environment::new(&name), false)?;
    println!("✓ Created environment '{}'", name);
    println!("  {}", container.environments().locate(&name).display());
    Ok(())
}
