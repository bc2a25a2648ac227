use tip::core::TipResult;
use tip::di::ServiceContainer;
use tip::resolver::dependency_report;

/// Print the transitive dependencies an environment doesn't list
///
/// The output is ready to paste into `tip add`.
pub fn run(container: &ServiceContainer, env: Option<String>) -> TipResult<()> {
    let environment = container.load_environment(env.as_deref())?;
    let report = dependency_report(&container.store(), &environment);

    for (spec, reason) in &report.skipped {
        println!("{} is not installed or corrupted, skipping its dependencies ({})", spec, reason);
    }
    if report.missing.is_empty() {
        println!("✓ Environment '{}' lists all its dependencies", environment.name());
        return Ok(());
    }
    let missing: Vec<String> = report.missing.iter().map(|s| s.to_string()).collect();
    println!("{}", missing.join(" "));
    Ok(())
}
