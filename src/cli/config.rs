use clap::Subcommand;
use tip::config::Config;
use tip::core::TipResult;
use tip::di::ServiceContainer;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a config value
    Set {
        /// Config key (site_packages_dir, cache_dir, links_dir, active_environment, python)
        key: String,
        /// New value
        value: String,
    },
    /// Reset a config value to its default
    Unset {
        /// Config key
        key: String,
    },
}

pub fn run(container: &ServiceContainer, command: ConfigCommands) -> TipResult<()> {
    let mut config = Config::load_from(container.config().tip_home())?;
    match command {
        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("✓ Set {} = {}", key, value.trim());
        }
        ConfigCommands::Unset { key } => {
            config.unset(&key)?;
            config.save()?;
            println!("✓ Unset {}", key);
        }
    }
    Ok(())
}
