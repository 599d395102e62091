//! Tinct Theme Editing
//!
//! Live design-token editing: tweak a running application's tokens, see the
//! effect instantly, and save only the changed tokens as a new derived theme
//! without mutating the base theme.
//!
//! # Overview
//!
//! - **Token registry**: the fixed list of editable token names
//! - **Style root**: an injected capability the preview writes to
//! - **Preview/diff**: overlays edits and tracks exactly which tokens changed
//! - **Selection**: the element open in a detail editor and its pre-edit value
//! - **Save as new theme**: turns the diff into a sparse persisted theme
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_theme::{ColorScheme, MemoryStyleRoot, ThemeEditor};
//!
//! let mut editor = ThemeEditor::new(MemoryStyleRoot::new());
//! editor.observe_theme(Some("neutral"));
//!
//! // Light value given, dark value derived by lightness inversion
//! editor
//!     .preview_token("--border", Some("oklch(0.90 0.01 250)"), None, ColorScheme::Light)
//!     .unwrap();
//! assert!(editor.is_dirty());
//! assert_eq!(editor.pending_changes()["--border"].dark, "oklch(0.1 0.01 250)");
//!
//! editor.reset_preview();
//! assert!(!editor.is_dirty());
//! ```
//!
//! # Sparse Themes
//!
//! A saved theme carries only the tokens changed in the session. It renders
//! correctly only on top of its base theme:
//!
//! ```css
//! [data-theme="sunset"] {
//!   --primary: oklch(0.6 0.2 30);
//! }
//! ```
//!
//! # Color Scheme
//!
//! Nothing here queries a global dark-mode flag. Every call that depends on
//! the rendering mode takes an explicit [`ColorScheme`].

pub mod config;
pub mod css;
pub mod error;
pub mod persist;
pub mod scheme;
pub mod selection;
pub mod state;
pub mod style_root;
pub mod tokens;

// Re-export commonly used types
pub use config::EditorConfig;
pub use error::{ConfigError, EditorError, StorageError};
pub use persist::{slugify, PendingSave, PersistedTheme, ThemeStorage};
pub use scheme::ColorScheme;
pub use selection::{ElementKind, PairSide, SelectedElement};
pub use state::{ActiveTheme, ActiveThemeState, ThemeEditor};
pub use style_root::{MemoryStyleRoot, StyleRoot};
pub use tokens::*;
