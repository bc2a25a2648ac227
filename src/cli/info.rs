use tip::core::TipResult;
use tip::di::ServiceContainer;

/// Show where Tip keeps things and which environment is active
pub fn run(container: &ServiceContainer) -> TipResult<()> {
    let config = container.config();

    match config.active_environment() {
        Some(name) => {
            println!("active environment: {}", name);
            println!(
                "active environment location: {}",
                container.environments().locate(&name).display()
            );
        }
        None => println!("active environment: (none)"),
    }
    println!("tip home: {}", config.tip_home().display());
    println!("site-packages directory: {}", config.site_packages_dir().display());
    match container.cache().root() {
        Ok(root) => println!("cache directory: {}", root.display()),
        Err(_) => println!("cache directory: (disabled)"),
    }
    println!("links directory: {}", config.links_dir().display());
    println!("python: {}", config.python());
    Ok(())
}
