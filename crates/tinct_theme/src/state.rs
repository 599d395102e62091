//! Theme editor state
//!
//! [`ThemeEditor`] overlays in-session token overrides on whatever theme the
//! style root currently renders, without touching the persisted theme:
//!
//! - `preview_token` writes the active scheme's value to the style root and
//!   records both schemes' values in the diff
//! - `reset_preview` removes exactly the overrides written this session
//! - `observe_theme` discards the draft whenever the active theme changes
//! - `begin_save` / `finish_save` turn the diff into a sparse derived theme
//!
//! The editor is single-threaded. Every call runs to completion on `&mut self`;
//! the only asynchronous boundary is the storage call during a save. While it
//! is in flight the diff is frozen: a second save and further previews are
//! rejected, so the saved theme always matches what is cleared afterwards.

use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tinct_color::{hex_to_oklch, invert_lightness, oklch_to_hex, Rgb8};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::{EditorError, StorageError};
use crate::persist::{slugify, PendingSave, PersistedTheme, SaveGuard, ThemeStorage};
use crate::scheme::ColorScheme;
use crate::selection::{ElementKind, PairSide, SelectedElement};
use crate::style_root::StyleRoot;
use crate::tokens::{TokenRegistry, TokenValue};

/// The externally active theme, polled at the start of each interaction
pub trait ActiveTheme {
    fn current_theme_id(&self) -> Option<&str>;
    fn color_scheme(&self) -> ColorScheme;
}

/// A plain [`ActiveTheme`] value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveThemeState {
    pub theme_id: Option<String>,
    pub scheme: ColorScheme,
}

impl ActiveThemeState {
    pub fn new(theme_id: impl Into<String>, scheme: ColorScheme) -> Self {
        Self {
            theme_id: Some(theme_id.into()),
            scheme,
        }
    }
}

impl ActiveTheme for ActiveThemeState {
    fn current_theme_id(&self) -> Option<&str> {
        self.theme_id.as_deref()
    }

    fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }
}

/// Live token editor over a [`StyleRoot`]
pub struct ThemeEditor<R: StyleRoot> {
    root: R,
    registry: TokenRegistry,
    config: EditorConfig,

    /// Tokens touched this session; a diff, never a full snapshot
    pending: IndexMap<String, TokenValue>,

    /// Theme the draft was started against
    base_theme_id: Option<String>,

    selected: Option<SelectedElement>,

    /// Raised while a [`PendingSave`] is alive
    save_in_flight: Arc<AtomicBool>,
}

impl<R: StyleRoot> ThemeEditor<R> {
    /// Create an editor with the default configuration and token registry
    pub fn new(root: R) -> Self {
        Self::with_config(root, EditorConfig::default())
    }

    pub fn with_config(root: R, config: EditorConfig) -> Self {
        Self {
            registry: config.registry(),
            root,
            config,
            pending: IndexMap::new(),
            base_theme_id: None,
            selected: None,
            save_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn style_root(&self) -> &R {
        &self.root
    }

    /// Mutable access for loading theme layers; inline overrides should go
    /// through the editor so the diff stays accurate
    pub fn style_root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    pub fn into_style_root(self) -> R {
        self.root
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ========== Base Theme Tracking ==========

    pub fn base_theme_id(&self) -> Option<&str> {
        self.base_theme_id.as_deref()
    }

    /// Track the externally active theme id.
    ///
    /// If it differs from the tracked base, the draft is discarded without
    /// confirmation and the new id becomes the base. Returns the number of
    /// discarded tokens.
    pub fn observe_theme(&mut self, theme_id: Option<&str>) -> usize {
        if self.base_theme_id.as_deref() == theme_id {
            return 0;
        }

        let discarded = self.pending.len();
        if discarded > 0 {
            warn!(
                "ThemeEditor: active theme changed {:?} -> {:?}, discarding {} unsaved token(s)",
                self.base_theme_id, theme_id, discarded
            );
        }
        self.reset_preview();

        info!("ThemeEditor: base theme is now {:?}", theme_id);
        self.base_theme_id = theme_id.map(str::to_string);
        discarded
    }

    /// Poll an [`ActiveTheme`] and return the scheme to use for this interaction
    pub fn sync(&mut self, active: &impl ActiveTheme) -> ColorScheme {
        self.observe_theme(active.current_theme_id());
        active.color_scheme()
    }

    // ========== Preview / Diff ==========

    /// Preview a token edit.
    ///
    /// At least one of `light`/`dark` is required. A missing variant is
    /// derived from the other by lightness inversion; values that are not
    /// colors (radii, font stacks) are used for both schemes. Hex input is
    /// stored as OKLCH. The active scheme's value is written to the style
    /// root and both values are recorded in the diff.
    ///
    /// Rejected with [`EditorError::SaveInFlight`] while a save is pending.
    pub fn preview_token(
        &mut self,
        name: &str,
        light: Option<&str>,
        dark: Option<&str>,
        scheme: ColorScheme,
    ) -> Result<TokenValue, EditorError> {
        if self.is_saving() {
            return Err(EditorError::SaveInFlight);
        }
        if self.config.strict_token_names && !self.registry.contains(name) {
            return Err(EditorError::UnknownToken(name.to_string()));
        }

        let light = light.map(canonicalize);
        let dark = dark.map(canonicalize);
        let value = match (light, dark) {
            (Some(light), Some(dark)) => TokenValue::new(light, dark),
            (Some(light), None) => {
                let dark = self.counterpart(&light);
                TokenValue::new(light, dark)
            }
            (None, Some(dark)) => {
                let light = self.counterpart(&dark);
                TokenValue::new(light, dark)
            }
            (None, None) => return Err(EditorError::MissingValue(name.to_string())),
        };

        debug!(
            "ThemeEditor::preview_token {} = {:?} ({})",
            name, value, scheme
        );
        self.root.set_property(name, value.get(scheme));
        self.pending.insert(name.to_string(), value.clone());
        Ok(value)
    }

    fn counterpart(&self, value: &str) -> String {
        invert_lightness(value, self.config.inversion_offset).unwrap_or_else(|| value.to_string())
    }

    /// Remove every override written this session and clear the diff.
    ///
    /// Idempotent; tokens never previewed are left alone.
    pub fn reset_preview(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        debug!("ThemeEditor::reset_preview ({} tokens)", self.pending.len());
        for name in self.pending.keys() {
            self.root.remove_property(name);
        }
        self.pending.clear();
    }

    /// Revert one token to its pre-session value.
    ///
    /// Returns `false` if the token had no pending change.
    pub fn revert_token(&mut self, name: &str) -> bool {
        if self.pending.shift_remove(name).is_none() {
            return false;
        }
        debug!("ThemeEditor::revert_token {}", name);
        self.root.remove_property(name);
        true
    }

    /// Rewrite every pending override for a newly active scheme
    pub fn apply_scheme(&mut self, scheme: ColorScheme) {
        for (name, value) in &self.pending {
            let active = value.get(scheme);
            if active.is_empty() {
                self.root.remove_property(name);
            } else {
                self.root.set_property(name, active);
            }
        }
    }

    /// The diff: tokens changed this session
    pub fn pending_changes(&self) -> &IndexMap<String, TokenValue> {
        &self.pending
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Rendered values of every registry token for the active scheme.
    ///
    /// Only `scheme`'s slot is filled; the other is left empty.
    pub fn current_tokens(&self, scheme: ColorScheme) -> IndexMap<String, TokenValue> {
        self.registry
            .iter()
            .map(|name| {
                let value = self.root.computed_value(name, scheme).unwrap_or_default();
                (name.to_string(), TokenValue::only(scheme, value))
            })
            .collect()
    }

    /// A token's rendered color as `#RRGGBB` for hex pickers.
    ///
    /// `None` if the token is unset or not a color.
    pub fn display_hex(&self, name: &str, scheme: ColorScheme) -> Option<String> {
        let value = self.root.computed_value(name, scheme)?;
        if let Ok(rgb) = Rgb8::from_hex(&value) {
            return Some(rgb.to_hex());
        }
        value
            .trim_start()
            .to_ascii_lowercase()
            .starts_with("oklch(")
            .then(|| oklch_to_hex(&value))
    }

    // ========== Selection ==========

    pub fn selected_element(&self) -> Option<&SelectedElement> {
        self.selected.as_ref()
    }

    pub fn set_selected_element(&mut self, element: Option<SelectedElement>) {
        self.selected = element;
    }

    /// Build a selection for `token_name`, snapshotting its pre-session values
    pub fn capture(&self, kind: ElementKind, token_name: &str) -> SelectedElement {
        let (light, dark) = self.originals(token_name);
        let mut element = SelectedElement::new(kind, token_name, light);
        element.original_dark_value = dark;
        element
    }

    /// Build a color-pair selection, snapshotting the edited side's values
    pub fn capture_pair(
        &self,
        background: &str,
        foreground: &str,
        side: PairSide,
    ) -> SelectedElement {
        let target = match side {
            PairSide::Background => background,
            PairSide::Foreground => foreground,
        };
        let (light, dark) = self.originals(target);
        let mut element = SelectedElement::pair(background, foreground, side, light);
        element.original_dark_value = dark;
        element
    }

    fn originals(&self, name: &str) -> (String, Option<String>) {
        (
            self.root
                .cascade_value(name, ColorScheme::Light)
                .unwrap_or_default(),
            self.root.cascade_value(name, ColorScheme::Dark),
        )
    }

    /// Preview an edit of the selected element's target token
    pub fn preview_selected(
        &mut self,
        light: Option<&str>,
        dark: Option<&str>,
        scheme: ColorScheme,
    ) -> Result<TokenValue, EditorError> {
        let target = self
            .selected
            .as_ref()
            .map(|element| element.target_token().to_string())
            .ok_or(EditorError::NoSelection)?;
        self.preview_token(&target, light, dark, scheme)
    }

    /// Revert the selected element's target token, returning its original value
    pub fn revert_selected(&mut self) -> Result<String, EditorError> {
        let (target, original) = self
            .selected
            .as_ref()
            .map(|element| {
                (
                    element.target_token().to_string(),
                    element.original_value.clone(),
                )
            })
            .ok_or(EditorError::NoSelection)?;
        self.revert_token(&target);
        Ok(original)
    }

    // ========== Save As New Theme ==========

    pub fn is_saving(&self) -> bool {
        self.save_in_flight.load(Ordering::Acquire)
    }

    /// Validate and render the diff as a new sparse theme, marking a save
    /// in flight.
    ///
    /// The diff is left untouched; it is cleared only by a successful
    /// [`finish_save`](Self::finish_save). Dropping the returned
    /// [`PendingSave`] instead releases the guard and keeps the draft.
    pub fn begin_save(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<PendingSave, EditorError> {
        if self.is_saving() {
            return Err(EditorError::SaveInFlight);
        }
        let base = self
            .base_theme_id
            .as_deref()
            .ok_or(EditorError::NoBaseTheme)?;
        if self.pending.is_empty() {
            return Err(EditorError::NothingToSave);
        }
        let id = slugify(name);
        if id.is_empty() {
            return Err(EditorError::InvalidThemeName(name.to_string()));
        }

        let theme = PersistedTheme::from_changes(
            id,
            name,
            description.map(str::to_string),
            base,
            &self.pending,
        );
        debug!(
            "ThemeEditor::begin_save {} ({} tokens over {})",
            theme.id,
            self.pending.len(),
            base
        );
        let guard =
            SaveGuard::acquire(&self.save_in_flight).ok_or(EditorError::SaveInFlight)?;
        Ok(PendingSave { theme, guard })
    }

    /// Complete a save with the storage outcome.
    ///
    /// On success the preview is reset and the new theme id returned; the
    /// caller switches the active theme to it. On failure the diff and the
    /// live preview stay exactly as they were so the user can retry.
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        outcome: Result<(), StorageError>,
    ) -> Result<String, EditorError> {
        let PendingSave { theme, guard } = pending;
        drop(guard);

        match outcome {
            Ok(()) => {
                info!(
                    "ThemeEditor: saved theme {} ({} tokens)",
                    theme.id,
                    self.pending.len()
                );
                self.reset_preview();
                Ok(theme.id)
            }
            Err(err) => {
                warn!("ThemeEditor: saving {} failed: {}", theme.id, err);
                Err(EditorError::Persistence(err.message))
            }
        }
    }

    /// Save the diff as a new theme through `storage`.
    ///
    /// If the returned future is dropped before storage answers, the save is
    /// abandoned: the guard is released and the draft stays dirty.
    pub async fn save_as_new_theme<S: ThemeStorage>(
        &mut self,
        storage: &S,
        name: &str,
        description: Option<&str>,
    ) -> Result<String, EditorError> {
        let pending = self.begin_save(name, description)?;
        let outcome = storage.save_theme(pending.theme()).await;
        self.finish_save(pending, outcome)
    }
}

/// Tokens are stored as OKLCH; hex input is converted, anything else kept
fn canonicalize(value: &str) -> String {
    let value = value.trim();
    if value.starts_with('#') && Rgb8::from_hex(value).is_ok() {
        hex_to_oklch(value)
    } else {
        value.to_string()
    }
}
