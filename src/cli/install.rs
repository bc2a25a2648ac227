use super::{at_most_one, parse_specifiers};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tip::core::TipResult;
use tip::di::ServiceContainer;
use tip::package::PackageSpecifier;
use tip::resolver::Resolution;

/// Install `specs` and their dependencies, or every package of an environment
pub fn run(container: &ServiceContainer, specs: Vec<String>, env: Option<String>) -> TipResult<()> {
    at_most_one(&[("SPECS", !specs.is_empty()), ("--env", env.is_some())])?;

    let environment = if specs.is_empty() {
        let environment = container.load_environment(env.as_deref())?;
        println!("Installing environment '{}'", environment.name());
        Some(environment)
    } else {
        // Requested packages are recopied into the cache even if their mtime didn't move.
        let cache = container.cache();
        for spec in parse_specifiers(&specs)? {
            cache.evict(spec.name(), spec.version())?;
        }
        None
    };

    let resolver = container.resolver();
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    let mut announce = |spec: &PackageSpecifier| spinner.set_message(format!("Installing {}", spec));

    let result = match &environment {
        Some(environment) => resolver.resolve_environment(&[], environment, &mut announce),
        None => resolver.resolve_with(&specs, &mut announce),
    };
    spinner.finish_and_clear();

    report(&result?);
    Ok(())
}

fn report(resolution: &Resolution) {
    for spec in &resolution.installed {
        println!("  ✓ {}", spec);
    }
    println!(
        "✓ Installed {} package(s), {} already present",
        resolution.installed.len(),
        resolution.skipped.len()
    );
}
