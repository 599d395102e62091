//! OKLCH colors and the CSS `oklch()` notation

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::{ColorParseError, Oklab, Rgb8};

/// Chroma below which a color is treated as achromatic (hue pinned to 0)
const ACHROMATIC_CHROMA: f64 = 1e-6;

/// Chroma that CSS maps to `100%`
const CHROMA_PERCENT_REFERENCE: f64 = 0.4;

/// A color in the OKLCH space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    /// Perceptual lightness, 0.0 to 1.0
    pub l: f64,
    /// Chroma, 0.0 upwards (sRGB tops out around 0.37)
    pub c: f64,
    /// Hue in degrees, 0.0..360.0
    pub h: f64,
    /// Optional alpha, 0.0 to 1.0
    pub alpha: Option<f64>,
}

/// Raw text of each `oklch()` component, as written
#[derive(Clone, Copy, Debug)]
pub(crate) struct OklchParts<'a> {
    pub l: &'a str,
    pub c: &'a str,
    pub h: &'a str,
    pub alpha: Option<&'a str>,
}

fn oklch_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        const NUM: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)";
        let source = format!(
            r"(?i)^\s*oklch\(\s*(?P<l>{NUM}%?)\s+(?P<c>{NUM}%?)\s+(?P<h>{NUM})(?:deg)?\s*(?:/\s*(?P<alpha>{NUM}%?)\s*)?\)\s*$"
        );
        Regex::new(&source).expect("oklch pattern is valid")
    })
}

impl<'a> OklchParts<'a> {
    pub(crate) fn split(input: &'a str) -> Option<Self> {
        let caps = oklch_pattern().captures(input)?;
        Some(Self {
            l: caps.name("l")?.as_str(),
            c: caps.name("c")?.as_str(),
            h: caps.name("h")?.as_str(),
            alpha: caps.name("alpha").map(|m| m.as_str()),
        })
    }
}

/// Parse a number that may carry a `%` suffix, scaling percentages to `reference`
pub(crate) fn parse_component(text: &str, reference: f64) -> Option<f64> {
    let value = match text.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0 * reference,
        None => text.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Round to `decimals` places and format without trailing zeros (`0.60` → `0.6`)
pub(crate) fn format_rounded(value: f64, decimals: i32) -> String {
    let factor = 10f64.powi(decimals);
    // `+ 0.0` folds -0.0 into 0.0 so it never prints as "-0"
    let rounded = (value * factor).round() / factor + 0.0;
    format!("{rounded}")
}

fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h,
            alpha: None,
        }
    }

    /// Set alpha and return the new color
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: Some(alpha),
            ..self
        }
    }

    /// Polar form of an Oklab color. Achromatic colors get hue 0, never NaN.
    pub fn from_oklab(lab: Oklab) -> Self {
        let c = lab.a.hypot(lab.b);
        let h = if c < ACHROMATIC_CHROMA {
            0.0
        } else {
            normalize_hue(lab.b.atan2(lab.a).to_degrees())
        };
        Self::new(lab.l, c, h)
    }

    pub fn to_oklab(self) -> Oklab {
        let (sin, cos) = self.h.to_radians().sin_cos();
        Oklab::new(self.l, self.c * cos, self.c * sin)
    }

    /// Full-precision conversion from 8-bit sRGB
    pub fn from_rgb8(rgb: Rgb8) -> Self {
        Self::from_oklab(Oklab::from_rgb8(rgb))
    }

    /// Convert to 8-bit sRGB, clamping out-of-gamut channels
    pub fn to_rgb8(self) -> Rgb8 {
        self.to_oklab().to_rgb8()
    }

    /// Parse CSS `oklch(L C H)` with optional `%` lightness/chroma, `deg` hue and `/ alpha`
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidOklch(input.to_string());
        let parts = OklchParts::split(input).ok_or_else(invalid)?;

        let l = parse_component(parts.l, 1.0).ok_or_else(invalid)?;
        let c = parse_component(parts.c, CHROMA_PERCENT_REFERENCE).ok_or_else(invalid)?;
        let h = parts.h.parse::<f64>().ok().filter(|h| h.is_finite());
        let h = h.ok_or_else(invalid)?;
        let alpha = match parts.alpha {
            Some(text) => Some(parse_component(text, 1.0).ok_or_else(invalid)?),
            None => None,
        };

        Ok(Self {
            l,
            c: c.max(0.0),
            h: normalize_hue(h),
            alpha,
        })
    }

    /// CSS text with L rounded to 2 decimals, C to 3 and H to whole degrees
    pub fn to_css(self) -> String {
        let c = format_rounded(self.c, 3);
        // Hue is meaningless once chroma rounds away
        let h = if c == "0" {
            0.0
        } else {
            normalize_hue(self.h.round())
        };
        let mut css = format!(
            "oklch({} {} {})",
            format_rounded(self.l, 2),
            c,
            format_rounded(h, 0)
        );
        if let Some(alpha) = self.alpha.filter(|a| *a < 1.0) {
            css.truncate(css.len() - 1);
            css.push_str(&format!(" / {})", format_rounded(alpha, 3)));
        }
        css
    }
}

impl Display for Oklch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Oklch {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_plain_notation() {
        assert_eq!(
            Oklch::parse("oklch(0.6 0.2 30)"),
            Ok(Oklch::new(0.6, 0.2, 30.0))
        );
        assert_eq!(
            Oklch::parse("  OKLCH( 0.90   0.01 250 ) "),
            Ok(Oklch::new(0.9, 0.01, 250.0))
        );
    }

    #[test]
    fn parses_percentages_degrees_and_alpha() {
        let color = Oklch::parse("oklch(62% 50% 30deg / 50%)").unwrap();
        assert!((color.l - 0.62).abs() < 1e-12);
        assert!((color.c - 0.2).abs() < 1e-12);
        assert_eq!(color.h, 30.0);
        assert_eq!(color.alpha, Some(0.5));

        let color = Oklch::parse("oklch(1 0 0 / 0.1)").unwrap();
        assert_eq!(color.alpha, Some(0.1));
    }

    #[test]
    fn normalizes_hue() {
        assert_eq!(Oklch::parse("oklch(0.5 0.1 -30)").unwrap().h, 330.0);
        assert_eq!(Oklch::parse("oklch(0.5 0.1 720)").unwrap().h, 0.0);
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in [
            "",
            "oklch()",
            "oklch(0.5 0.1)",
            "oklch(0.5, 0.1, 30)",
            "oklab(0.5 0.1 0.1)",
            "oklch(a b c)",
            "#ff0000",
        ] {
            assert!(Oklch::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn css_rounding_and_trailing_zeros() {
        assert_eq!(Oklch::new(0.6, 0.2, 30.0).to_css(), "oklch(0.6 0.2 30)");
        assert_eq!(
            Oklch::new(0.627_955, 0.257_683, 29.233_885).to_css(),
            "oklch(0.63 0.258 29)"
        );
        assert_eq!(Oklch::new(0.5, 0.1, 359.7).to_css(), "oklch(0.5 0.1 0)");
        assert_eq!(Oklch::new(-1e-12, 0.0, 0.0).to_css(), "oklch(0 0 0)");
    }

    #[test]
    fn achromatic_css_pins_hue_to_zero() {
        assert_eq!(Oklch::new(0.6, 0.000_2, 137.0).to_css(), "oklch(0.6 0 0)");
    }

    #[test]
    fn translucent_css_keeps_alpha() {
        assert_eq!(
            Oklch::new(1.0, 0.0, 0.0).with_alpha(0.1).to_css(),
            "oklch(1 0 0 / 0.1)"
        );
        assert_eq!(
            Oklch::new(1.0, 0.0, 0.0).with_alpha(1.0).to_css(),
            "oklch(1 0 0)"
        );
    }

    #[test]
    fn gray_has_zero_hue_not_nan() {
        let gray = Oklch::from_rgb8(Rgb8::GRAY);
        assert_eq!(gray.h, 0.0);
        assert!(gray.c < 1e-6);
    }
}
