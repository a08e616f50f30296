//! TOML configuration for taxonomy extensions.
//!
//! Tools that introduce their own node types (usually namespaced custom
//! kinds such as `acme:widget`) describe them in a small TOML document instead
//! of patching the canonical taxonomy:
//!
//! ```toml
//! include_canonical = true
//!
//! [types."acme:widget"]
//! requires_parent = true
//! ```

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read taxonomy config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("taxonomy config declares a node type with an empty name")]
    EmptyTypeName,
}

///
/// TaxonomyConfig
///
/// Declarative extension of the requirement table.
/// Entries here override canonical entries of the same name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaxonomyConfig {
    #[serde(default = "default_include_canonical")]
    pub include_canonical: bool,

    #[serde(default)]
    pub types: BTreeMap<String, TypeConfig>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            include_canonical: true,
            types: BTreeMap::new(),
        }
    }
}

const fn default_include_canonical() -> bool {
    true
}

impl TaxonomyConfig {
    /// Parse and check a config from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.check()?;

        Ok(config)
    }

    /// Read, parse and check a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Add or replace one type entry.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, requires_parent: bool) -> Self {
        self.types
            .insert(name.into(), TypeConfig { requires_parent });
        self
    }

    // check
    fn check(&self) -> Result<(), ConfigError> {
        if self.types.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyTypeName);
        }

        Ok(())
    }
}

///
/// TypeConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    #[serde(default)]
    pub requires_parent: bool,
}
