//! Exact `name==version` package identifiers

use crate::core::error::{TipError, TipResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between package name and version
pub const SEPARATOR: &str = "==";

/// One exact build of a package, written `name==version`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageSpecifier {
    name: String,
    version: String,
}

impl PackageSpecifier {
    /// Build a specifier from its parts, validating both
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> TipResult<Self> {
        let name = name.into();
        let version = version.into();
        if !is_valid_part(&name) || !is_valid_part(&version) {
            return Err(TipError::MalformedSpecifier {
                input: format!("{}{}{}", name, SEPARATOR, version),
            });
        }
        Ok(Self { name, version })
    }

    /// Parse `name==version`
    ///
    /// Fails unless splitting on `==` yields exactly two non-empty parts.
    pub fn parse(text: &str) -> TipResult<Self> {
        let mut parts = text.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(version), None) if !name.is_empty() && !version.is_empty() => {
                Ok(Self {
                    name: name.to_string(),
                    version: version.to_string(),
                })
            }
            _ => Err(TipError::MalformedSpecifier {
                input: text.to_string(),
            }),
        }
    }

    /// True iff `parse` would succeed
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Canonical `name==version` form
    pub fn format(&self) -> String {
        self.to_string()
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains(SEPARATOR)
}

impl fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, SEPARATOR, self.version)
    }
}

impl FromStr for PackageSpecifier {
    type Err = TipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PackageSpecifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PackageSpecifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
