//! Color parsing errors

use thiserror::Error;

/// Errors produced by the strict color parsers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Not a `#RRGGBB` or `#RGB` hex color
    #[error("invalid hex color `{0}` (expected #RRGGBB)")]
    InvalidHex(String),

    /// Not an `oklch(L C H)` color
    #[error("invalid oklch color `{0}` (expected oklch(L C H))")]
    InvalidOklch(String),
}
