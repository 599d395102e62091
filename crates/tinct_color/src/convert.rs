//! Non-failing string conversions used by the token editor

use tracing::warn;

use crate::oklch::{format_rounded, parse_component, OklchParts};
use crate::{Oklch, Rgb8};

/// Returned by [`oklch_to_hex`] when its input cannot be parsed
pub const FALLBACK_HEX: &str = "#808080";

/// Returned by [`hex_to_oklch`] when its input cannot be parsed
pub const FALLBACK_OKLCH: &str = "oklch(0.5 0 0)";

/// Convert `#RRGGBB` to `oklch(L C H)`.
///
/// L is rounded to 2 decimals, C to 3 and H to whole degrees. Achromatic
/// input yields hue 0. Malformed input logs a warning and returns
/// [`FALLBACK_OKLCH`].
pub fn hex_to_oklch(hex: &str) -> String {
    match Rgb8::from_hex(hex) {
        Ok(rgb) => Oklch::from_rgb8(rgb).to_css(),
        Err(err) => {
            warn!("hex_to_oklch: {err}, falling back to {FALLBACK_OKLCH}");
            FALLBACK_OKLCH.to_string()
        }
    }
}

/// Convert `oklch(L C H)` to uppercase `#RRGGBB`.
///
/// Out-of-gamut colors are clamped per channel, alpha is ignored. Malformed
/// input logs a warning and returns [`FALLBACK_HEX`].
pub fn oklch_to_hex(oklch: &str) -> String {
    match Oklch::parse(oklch) {
        Ok(color) => color.to_rgb8().to_hex(),
        Err(err) => {
            warn!("oklch_to_hex: {err}, falling back to {FALLBACK_HEX}");
            FALLBACK_HEX.to_string()
        }
    }
}

/// Derive the opposite color scheme's counterpart of an `oklch()` value.
///
/// Computes `L' = clamp(1 - L + offset, 0, 1)` and keeps chroma, hue and
/// alpha exactly as written. This is a cheap mirror, not a contrast-aware
/// derivation. Returns `None` if `value` is not `oklch()` notation.
pub fn invert_lightness(value: &str, offset: f64) -> Option<String> {
    let parts = OklchParts::split(value)?;
    let l = parse_component(parts.l, 1.0)?;
    let inverted = (1.0 - l + offset).clamp(0.0, 1.0);

    let mut css = format!(
        "oklch({} {} {}",
        format_rounded(inverted, 3),
        parts.c,
        parts.h
    );
    if let Some(alpha) = parts.alpha {
        css.push_str(" / ");
        css.push_str(alpha);
    }
    css.push(')');
    Some(css)
}
