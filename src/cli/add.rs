use super::parse_specifiers;
use tip::core::TipResult;
use tip::di::ServiceContainer;
use tip::environment::AddOutcome;

pub struct AddArgs {
    pub specs: Vec<String>,
    pub env: Option<String>,
    pub from: Option<String>,
    pub replace: bool,
}

/// Add packages to an environment, optionally every package of another one
///
/// Nothing is saved if any package conflicts with a different version.
pub fn run(container: &ServiceContainer, args: AddArgs) -> TipResult<()> {
    let specs = parse_specifiers(&args.specs)?;
    let mut environment = container.load_environment(args.env.as_deref())?;

    if let Some(from) = &args.from {
        let source = container.environments().load(from)?;
        let added = environment.extend_from(&source, args.replace)?;
        println!("✓ Added {} package(s) from '{}'", added, from);
    }

    for spec in &specs {
        match environment.add_package(spec, args.replace)? {
            AddOutcome::Added => println!("✓ Added {}", spec),
            AddOutcome::Unchanged => println!("  {} is already in the environment", spec),
            AddOutcome::Replaced { previous_version } => {
                println!("✓ Replaced {}=={} with {}", spec.name(), previous_version, spec)
            }
        }
    }

    container.environments().save(&environment, true)?;
    Ok(())
}
