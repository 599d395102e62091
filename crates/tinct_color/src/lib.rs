//! Tinct color conversion
//!
//! Design tokens are authored in OKLCH but edited through conventional hex
//! pickers. This crate converts between the two:
//!
//! ```text
//!   #RRGGBB ↔ sRGB ↔ linear sRGB ↔ LMS ↔ Oklab ↔ OKLCH ↔ oklch(L C H)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_color::{hex_to_oklch, oklch_to_hex};
//!
//! assert_eq!(hex_to_oklch("#808080"), "oklch(0.6 0 0)");
//! assert_eq!(oklch_to_hex("oklch(1 0 0)"), "#FFFFFF");
//! ```
//!
//! The string functions never fail. Malformed input logs a warning and
//! resolves to a neutral fallback ([`FALLBACK_HEX`] / [`FALLBACK_OKLCH`]) so
//! a half-typed value cannot break an editing session. Use the typed
//! [`Rgb8`] and [`Oklch`] parsers when an error is wanted instead.
//!
//! # Precision
//!
//! [`hex_to_oklch`] rounds L to 2 decimals, C to 3 and H to whole degrees.
//! The typed path ([`Oklch::from_rgb8`] / [`Oklch::to_rgb8`]) keeps full
//! `f64` precision and reproduces every in-gamut hex value exactly.

mod convert;
mod error;
mod oklab;
mod oklch;
mod srgb;

pub use convert::{hex_to_oklch, invert_lightness, oklch_to_hex, FALLBACK_HEX, FALLBACK_OKLCH};
pub use error::ColorParseError;
pub use oklab::Oklab;
pub use oklch::Oklch;
pub use srgb::{linear_to_srgb, srgb_to_linear, Rgb8};
