//! Editor configuration (`tinct.toml`)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::tokens::{TokenRegistry, REGISTRY_VERSION};

/// Tunables for a [`ThemeEditor`](crate::ThemeEditor)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Added to the mirrored lightness when deriving the other scheme:
    /// `L' = clamp(1 - L + offset, 0, 1)`
    pub inversion_offset: f64,

    /// Reject token names that are not in the registry
    pub strict_token_names: bool,

    /// Version reported for a custom `tokens` list
    pub registry_version: Option<u32>,

    /// Replaces the built-in token list
    pub tokens: Option<Vec<String>>,
}

impl EditorConfig {
    /// Parse from TOML text; missing keys take their defaults
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The token registry this config selects
    pub fn registry(&self) -> TokenRegistry {
        match &self.tokens {
            Some(names) => TokenRegistry::new(
                self.registry_version.unwrap_or(REGISTRY_VERSION),
                names.iter().cloned(),
            ),
            None => TokenRegistry::default(),
        }
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
