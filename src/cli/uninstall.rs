use super::parse_specifiers;
use tip::core::TipResult;
use tip::di::ServiceContainer;

/// Delete installed packages from the store
///
/// Every specifier is validated before anything is removed. Packages that
/// aren't installed are reported and skipped.
pub fn run(container: &ServiceContainer, specs: Vec<String>) -> TipResult<()> {
    let store = container.store();
    let specs = parse_specifiers(&specs)?;
    for spec in &specs {
        store.locate_spec(spec)?;
    }

    for spec in specs {
        if !store.is_installed(&spec) {
            println!("Package '{}' is not installed, skipping", spec);
            continue;
        }
        store.uninstall(&spec)?;
        println!("✓ Uninstalled {}", spec);
    }
    Ok(())
}
