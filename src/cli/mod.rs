pub mod activate;
pub mod add;
pub mod cache;
pub mod config;
pub mod create;
pub mod delete;
pub mod dependencies;
pub mod info;
pub mod install;
pub mod list;
pub mod python;
pub mod remove;
pub mod run;
pub mod uninstall;

use tip::core::{TipError, TipResult};
use tip::package::PackageSpecifier;

/// Parse every argument, failing on the first malformed one
pub fn parse_specifiers(texts: &[String]) -> TipResult<Vec<PackageSpecifier>> {
    texts.iter().map(|text| PackageSpecifier::parse(text)).collect()
}

/// Fail unless at most one of the flags is set
pub fn at_most_one(flags: &[(&str, bool)]) -> TipResult<()> {
    let given: Vec<&str> = flags
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect();
    if given.len() > 1 {
        return Err(TipError::Config(format!(
            "At most one of {} can be given",
            given.join(", ")
        )));
    }
    Ok(())
}
