//! Light/dark token values

use serde::{Deserialize, Serialize};

use crate::scheme::ColorScheme;

/// Both color-scheme variants of one token.
///
/// An empty string means the value is unknown or inherited from the cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValue {
    pub light: String,
    pub dark: String,
}

impl TokenValue {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// A value known for one scheme only, the other slot left empty
    pub fn only(scheme: ColorScheme, value: impl Into<String>) -> Self {
        let mut token = Self::default();
        token.set(scheme, value);
        token
    }

    /// Get the variant for a scheme
    pub fn get(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Replace the variant for a scheme
    pub fn set(&mut self, scheme: ColorScheme, value: impl Into<String>) {
        match scheme {
            ColorScheme::Light => self.light = value.into(),
            ColorScheme::Dark => self.dark = value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }
}
