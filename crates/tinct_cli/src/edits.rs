//! Edits file handling
//!
//! ```toml
//! [[edit]]
//! token = "--primary"
//! light = "#e11d48"          # dark is derived when omitted
//!
//! [[edit]]
//! token = "--radius"
//! light = "0.75rem"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A list of token edits applied in order
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EditsFile {
    #[serde(default)]
    pub edit: Vec<TokenEdit>,
}

/// One token edit; at least one of `light`/`dark` must be set
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenEdit {
    pub token: String,
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub dark: Option<String>,
}

impl EditsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edits_in_order() {
        let file = EditsFile::parse(
            r##"
[[edit]]
token = "--primary"
light = "#e11d48"

[[edit]]
token = "--border"
dark = "oklch(0.3 0 0)"
"##,
        )
        .unwrap();

        assert_eq!(file.edit.len(), 2);
        assert_eq!(file.edit[0].token, "--primary");
        assert_eq!(file.edit[0].light.as_deref(), Some("#e11d48"));
        assert_eq!(file.edit[0].dark, None);
        assert_eq!(file.edit[1].dark.as_deref(), Some("oklch(0.3 0 0)"));
    }

    #[test]
    fn empty_file_has_no_edits() {
        assert!(EditsFile::parse("").unwrap().edit.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(EditsFile::parse("[[edit]]\ntoken = \"--a\"\ncolour = \"#fff\"\n").is_err());
    }
}
