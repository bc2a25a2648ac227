use super::at_most_one;
use tip::core::TipResult;
use tip::di::ServiceContainer;
use tip::package::PackageSpecifier;

/// Show the packages of an environment, or every installed package
pub fn run(container: &ServiceContainer, env: Option<String>, installed: bool) -> TipResult<()> {
    at_most_one(&[("--env", env.is_some()), ("--installed", installed)])?;

    if installed {
        let store = container.store();
        println!("{}", store.root().display());
        print_installed(&store.list_installed()?);
        return Ok(());
    }

    let environment = container.load_environment(env.as_deref())?;
    println!("{}", container.environments().locate(environment.name()).display());
    if environment.is_empty() {
        println!("  (no packages)");
    }
    for (name, version) in environment.packages() {
        println!("  📦 {} {}", name, version);
    }
    Ok(())
}

/// One line per package name, its versions below it
fn print_installed(installed: &[PackageSpecifier]) {
    if installed.is_empty() {
        println!("  (no packages installed)");
        return;
    }
    let mut current: Option<&str> = None;
    for spec in installed {
        if current != Some(spec.name()) {
            println!("  📦 {}", spec.name());
            current = Some(spec.name());
        }
        println!("      {}", spec.version());
    }
}
