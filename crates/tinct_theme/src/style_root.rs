//! Live style root capability
//!
//! The editor never touches a global document. It writes inline overrides
//! through [`StyleRoot`] and reads computed values back, so any surface
//! (a browser root element, a native renderer, a test double) can host a
//! preview.

use rustc_hash::FxHashMap;

use crate::css::{parse_declarations, parse_rules};
use crate::persist::PersistedTheme;
use crate::scheme::ColorScheme;

/// A mutable, observable key-value store of token values scoped by scheme
pub trait StyleRoot {
    /// Set an inline override that wins over the cascade
    fn set_property(&mut self, name: &str, value: &str);

    /// Remove an inline override; no-op if none is set
    fn remove_property(&mut self, name: &str);

    /// The value currently rendered for `scheme`, inline overrides included
    fn computed_value(&self, name: &str, scheme: ColorScheme) -> Option<String>;

    /// The value the cascade resolves for `scheme` without inline overrides
    fn cascade_value(&self, name: &str, scheme: ColorScheme) -> Option<String>;
}

/// In-memory [`StyleRoot`]: loaded theme layers plus inline overrides.
///
/// Themes are layered in load order, so a sparse derived theme loaded after
/// its base only replaces the tokens it carries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStyleRoot {
    light: FxHashMap<String, String>,
    dark: FxHashMap<String, String>,
    inline: FxHashMap<String, String>,
}

impl MemoryStyleRoot {
    pub fn new() -> Self {
        Self::default()
    }

    fn layer_mut(&mut self, scheme: ColorScheme) -> &mut FxHashMap<String, String> {
        match scheme {
            ColorScheme::Light => &mut self.light,
            ColorScheme::Dark => &mut self.dark,
        }
    }

    fn layer(&self, scheme: ColorScheme) -> &FxHashMap<String, String> {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Set one cascade value
    pub fn set_cascade_value(&mut self, name: &str, scheme: ColorScheme, value: &str) {
        self.layer_mut(scheme)
            .insert(name.to_string(), value.to_string());
    }

    /// Layer a stylesheet's custom properties onto one scheme.
    ///
    /// Returns the number of declarations applied.
    pub fn apply_css(&mut self, scheme: ColorScheme, css: &str) -> usize {
        let declarations = parse_declarations(css);
        let count = declarations.len();
        self.layer_mut(scheme).extend(declarations);
        count
    }

    /// Layer a stylesheet whose rules select their own scheme
    /// (`:root` for light, `.dark` for dark)
    pub fn apply_stylesheet(&mut self, css: &str) -> usize {
        let mut count = 0;
        for rule in parse_rules(css) {
            let scheme = rule.scheme();
            count += rule.declarations.len();
            self.layer_mut(scheme).extend(rule.declarations);
        }
        count
    }

    /// Layer a persisted theme onto both schemes
    pub fn apply_theme(&mut self, theme: &PersistedTheme) -> usize {
        self.apply_css(ColorScheme::Light, &theme.light_css)
            + self.apply_css(ColorScheme::Dark, &theme.dark_css)
    }

    /// Inline overrides currently set
    pub fn inline_properties(&self) -> &FxHashMap<String, String> {
        &self.inline
    }

    pub fn has_inline(&self, name: &str) -> bool {
        self.inline.contains_key(name)
    }
}

impl StyleRoot for MemoryStyleRoot {
    fn set_property(&mut self, name: &str, value: &str) {
        self.inline.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.inline.remove(name);
    }

    fn computed_value(&self, name: &str, scheme: ColorScheme) -> Option<String> {
        self.inline
            .get(name)
            .or_else(|| self.layer(scheme).get(name))
            .cloned()
    }

    fn cascade_value(&self, name: &str, scheme: ColorScheme) -> Option<String> {
        self.layer(scheme).get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_overrides_win_until_removed() {
        let mut root = MemoryStyleRoot::new();
        root.set_cascade_value("--primary", ColorScheme::Light, "oklch(0.2 0 0)");

        root.set_property("--primary", "oklch(0.6 0.2 30)");
        assert_eq!(
            root.computed_value("--primary", ColorScheme::Light).as_deref(),
            Some("oklch(0.6 0.2 30)")
        );
        assert_eq!(
            root.cascade_value("--primary", ColorScheme::Light).as_deref(),
            Some("oklch(0.2 0 0)")
        );

        root.remove_property("--primary");
        assert_eq!(
            root.computed_value("--primary", ColorScheme::Light).as_deref(),
            Some("oklch(0.2 0 0)")
        );
    }

    #[test]
    fn layers_are_scoped_by_scheme() {
        let mut root = MemoryStyleRoot::new();
        root.apply_css(ColorScheme::Light, ":root { --border: oklch(0.92 0 0); }");
        root.apply_css(ColorScheme::Dark, ".dark { --border: oklch(1 0 0 / 10%); }");

        assert_eq!(
            root.computed_value("--border", ColorScheme::Light).as_deref(),
            Some("oklch(0.92 0 0)")
        );
        assert_eq!(
            root.computed_value("--border", ColorScheme::Dark).as_deref(),
            Some("oklch(1 0 0 / 10%)")
        );
        assert_eq!(root.computed_value("--ring", ColorScheme::Dark), None);
    }

    #[test]
    fn stylesheet_routes_rules_by_selector() {
        let mut root = MemoryStyleRoot::new();
        let count = root.apply_stylesheet(
            ":root { --ring: oklch(0.708 0 0); }\n.dark { --ring: oklch(0.556 0 0); }",
        );
        assert_eq!(count, 2);
        assert_eq!(
            root.computed_value("--ring", ColorScheme::Light).as_deref(),
            Some("oklch(0.708 0 0)")
        );
        assert_eq!(
            root.computed_value("--ring", ColorScheme::Dark).as_deref(),
            Some("oklch(0.556 0 0)")
        );
    }

    #[test]
    fn sparse_theme_layers_over_base() {
        let mut root = MemoryStyleRoot::new();
        root.apply_css(
            ColorScheme::Light,
            ":root { --primary: oklch(0.2 0 0); --border: oklch(0.92 0 0); }",
        );
        root.apply_css(
            ColorScheme::Light,
            "[data-theme=\"sunset\"] {\n  --primary: oklch(0.6 0.2 30);\n}",
        );

        assert_eq!(
            root.computed_value("--primary", ColorScheme::Light).as_deref(),
            Some("oklch(0.6 0.2 30)")
        );
        assert_eq!(
            root.computed_value("--border", ColorScheme::Light).as_deref(),
            Some("oklch(0.92 0 0)")
        );
    }
}
