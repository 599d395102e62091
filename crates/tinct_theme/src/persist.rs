//! Save-as-new-theme persistence protocol
//!
//! A saved theme is *sparse*: its CSS carries only the tokens changed in the
//! editing session. It renders correctly only when its base theme's CSS is
//! already loaded and the derived rules come after it in the cascade.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::css::{render_rule, theme_selector};
use crate::error::StorageError;
use crate::scheme::ColorScheme;
use crate::tokens::TokenValue;

/// Longest theme id [`slugify`] produces
pub const MAX_SLUG_LEN: usize = 50;

/// A theme record as handed to storage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTheme {
    /// Slug derived from `name`
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "lightCSS")]
    pub light_css: String,
    #[serde(rename = "darkCSS")]
    pub dark_css: String,
    /// Theme whose CSS must be loaded before this one
    #[serde(rename = "baseThemeId")]
    pub base_theme_id: String,
}

impl PersistedTheme {
    /// Render a sparse theme from a token diff.
    ///
    /// Only tokens present in `changes` are emitted; empty variants are
    /// skipped since they mean "inherit".
    pub fn from_changes(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        base_theme_id: impl Into<String>,
        changes: &IndexMap<String, TokenValue>,
    ) -> Self {
        let id = id.into();
        let rule = |scheme: ColorScheme| {
            render_rule(
                &theme_selector(&id, scheme),
                changes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.get(scheme)))
                    .filter(|(_, value)| !value.is_empty()),
            )
        };
        let light_css = rule(ColorScheme::Light);
        let dark_css = rule(ColorScheme::Dark);

        Self {
            id,
            name: name.into(),
            description,
            light_css,
            dark_css,
            base_theme_id: base_theme_id.into(),
        }
    }

    /// CSS for one scheme
    pub fn css(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Light => &self.light_css,
            ColorScheme::Dark => &self.dark_css,
        }
    }
}

/// Where saved themes go.
///
/// Implementations are expected to upsert: saving the same id twice replaces
/// the earlier record. Transport concerns (timeouts, retries, rollback)
/// belong to the implementation.
pub trait ThemeStorage {
    fn save_theme(
        &self,
        theme: &PersistedTheme,
    ) -> impl Future<Output = Result<(), StorageError>>;
}

/// A save that has been validated and rendered but not yet confirmed by
/// storage. Hand it back to [`ThemeEditor::finish_save`](crate::ThemeEditor::finish_save);
/// while it is alive the editor rejects further saves and edits. Dropping it
/// (for example by abandoning a `save_as_new_theme` future) releases the
/// editor and leaves the draft as it was.
#[must_use = "a pending save blocks further saves until passed to finish_save"]
#[derive(Debug)]
pub struct PendingSave {
    pub(crate) theme: PersistedTheme,
    pub(crate) guard: SaveGuard,
}

impl PendingSave {
    pub fn theme(&self) -> &PersistedTheme {
        &self.theme
    }

    pub fn id(&self) -> &str {
        &self.theme.id
    }
}

/// Holds the editor's in-flight flag until dropped
#[derive(Debug)]
pub(crate) struct SaveGuard(Arc<AtomicBool>);

impl SaveGuard {
    /// Raise `flag`; `None` if a save already holds it
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Derive a theme id from a display name.
///
/// Lowercases, turns every run of whitespace, `_`, `-` or other characters
/// outside `[a-z0-9]` into a single hyphen, trims hyphens from both ends and
/// caps the result at [`MAX_SLUG_LEN`] characters. Collisions with existing
/// ids are not checked here.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slugify_edge_cases() {
        assert_eq!(slugify("Sunset"), "sunset");
        assert_eq!(slugify("  Spaced Theme  "), "spaced-theme");
        assert_eq!(slugify("Special!@#Chars"), "special-chars");
        assert_eq!(slugify("snake_case__name"), "snake-case-name");
        assert_eq!(slugify("--Already-Hyphenated--"), "already-hyphenated");
        assert_eq!(slugify("Ocean Blue 2"), "ocean-blue-2");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_caps_length_without_trailing_hyphen() {
        let long = "a".repeat(49) + " b" + &"c".repeat(20);
        let slug = slugify(&long);
        assert_eq!(slug, "a".repeat(49));
        assert!(slugify(&"word ".repeat(30)).len() <= MAX_SLUG_LEN);
    }

    #[test]
    fn renders_only_changed_tokens() {
        let mut changes = IndexMap::new();
        changes.insert(
            "--primary".to_string(),
            TokenValue::new("oklch(0.6 0.2 30)", "oklch(0.4 0.2 30)"),
        );
        let theme = PersistedTheme::from_changes("sunset", "Sunset", None, "neutral", &changes);

        assert_eq!(
            theme.light_css,
            "[data-theme=\"sunset\"] {\n  --primary: oklch(0.6 0.2 30);\n}"
        );
        assert_eq!(
            theme.dark_css,
            ".dark[data-theme=\"sunset\"] {\n  --primary: oklch(0.4 0.2 30);\n}"
        );
        assert_eq!(theme.base_theme_id, "neutral");
    }

    #[test]
    fn empty_variants_are_inherited() {
        let mut changes = IndexMap::new();
        changes.insert("--ring".to_string(), TokenValue::only(ColorScheme::Dark, "oklch(0.5 0 0)"));
        let theme = PersistedTheme::from_changes("x", "X", None, "base", &changes);

        assert_eq!(theme.css(ColorScheme::Light), "[data-theme=\"x\"] {\n}");
        assert_eq!(
            theme.css(ColorScheme::Dark),
            ".dark[data-theme=\"x\"] {\n  --ring: oklch(0.5 0 0);\n}"
        );
    }

    #[test]
    fn storage_record_uses_css_field_names() {
        let theme =
            PersistedTheme::from_changes("x", "X", Some("d".into()), "base", &IndexMap::new());
        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("lightCSS").is_some());
        assert!(json.get("darkCSS").is_some());
        assert_eq!(json["baseThemeId"], "base");
        assert_eq!(json["description"], "d");
    }

    #[test]
    fn save_guard_is_exclusive_until_dropped() {
        let flag = Arc::new(AtomicBool::new(false));
        let guard = SaveGuard::acquire(&flag).unwrap();
        assert!(flag.load(Ordering::Acquire));
        assert!(SaveGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(SaveGuard::acquire(&flag).is_some());
    }
}
