use super::parse_specifiers;
use tip::core::{TipError, TipResult};
use tip::di::ServiceContainer;

/// Remove packages from an environment
///
/// Absent packages and version mismatches are reported, not fatal.
pub fn run(container: &ServiceContainer, specs: Vec<String>, env: Option<String>) -> TipResult<()> {
    let specs = parse_specifiers(&specs)?;
    let mut environment = container.load_environment(env.as_deref())?;

    for spec in &specs {
        match environment.remove_package(spec) {
            Ok(()) => println!("✓ Removed {}", spec),
            Err(e @ (TipError::NotPresent { .. } | TipError::VersionMismatch { .. })) => {
                println!("  {}", e)
            }
            Err(e) => return Err(e),
        }
    }

    container.environments().save(&environment, true)?;
    Ok(())
}
