//! Detail-editor selection state
//!
//! Tracks the single element a detail editor targets and the values it had
//! before any edit this session, so one token can be reverted without
//! resetting the whole draft.

use serde::{Deserialize, Serialize};

use crate::scheme::ColorScheme;

/// What kind of element is being edited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Color,
    /// A background token with its paired foreground token
    ColorPair,
    Font,
    Radius,
    Shadow,
}

/// Which half of a color pair is being edited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairSide {
    Background,
    Foreground,
}

/// The element open in the detail editor.
///
/// `original_value` / `original_dark_value` are captured once at selection
/// time and never recomputed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub token_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<PairSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_token_name: Option<String>,
    pub original_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_dark_value: Option<String>,
}

impl SelectedElement {
    pub fn new(
        kind: ElementKind,
        token_name: impl Into<String>,
        original_value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            token_name: token_name.into(),
            sub_type: None,
            foreground_token_name: None,
            original_value: original_value.into(),
            original_dark_value: None,
        }
    }

    /// A color pair selection; `token_name` is the background token
    pub fn pair(
        background: impl Into<String>,
        foreground: impl Into<String>,
        side: PairSide,
        original_value: impl Into<String>,
    ) -> Self {
        Self {
            kind: ElementKind::ColorPair,
            token_name: background.into(),
            sub_type: Some(side),
            foreground_token_name: Some(foreground.into()),
            original_value: original_value.into(),
            original_dark_value: None,
        }
    }

    pub fn with_dark_value(mut self, value: impl Into<String>) -> Self {
        self.original_dark_value = Some(value.into());
        self
    }

    /// The token that edit and revert operations act on.
    ///
    /// The foreground token when editing a pair's foreground half, the
    /// primary `token_name` otherwise.
    pub fn target_token(&self) -> &str {
        match (self.sub_type, &self.foreground_token_name) {
            (Some(PairSide::Foreground), Some(foreground)) => foreground,
            _ => &self.token_name,
        }
    }

    /// Captured pre-edit value for a scheme
    pub fn original_for(&self, scheme: ColorScheme) -> Option<&str> {
        match scheme {
            ColorScheme::Light => Some(self.original_value.as_str()),
            ColorScheme::Dark => self.original_dark_value.as_deref(),
        }
    }
}
