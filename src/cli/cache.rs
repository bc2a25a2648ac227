use clap::Subcommand;
use tip::core::TipResult;
use tip::di::ServiceContainer;

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Delete every cache entry
    Clear,
}

pub fn run(container: &ServiceContainer, command: CacheCommands) -> TipResult<()> {
    match command {
        CacheCommands::Clear => {
            let cache = container.cache();
            if !cache.is_enabled() {
                println!("Cache is disabled, nothing to clear");
                return Ok(());
            }
            cache.clear()?;
            println!("✓ Cleared cache at {}", cache.root()?.display());
        }
    }
    Ok(())
}
