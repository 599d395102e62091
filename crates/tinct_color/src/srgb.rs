//! 8-bit sRGB colors and the sRGB transfer function

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ColorParseError;

/// An opaque sRGB color with 8 bits per channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const GRAY: Rgb8 = Rgb8::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the `#` is optional, digits are case-insensitive)
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(hex.to_string());
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
                match (channel(0), channel(2), channel(4)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
                    _ => Err(invalid()),
                }
            }
            3 => {
                // #RGB expands each digit: #F80 == #FF8800
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
                match (channel(0), channel(1), channel(2)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Format as uppercase `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels normalized to 0.0..=1.0 (gamma encoded)
    pub fn to_unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    /// Build from gamma-encoded unit channels, clamping anything out of gamut
    pub fn from_unit_clamped(rgb: [f64; 3]) -> Self {
        let to_u8 = |v: f64| {
            if v.is_nan() {
                return 0;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        Self::new(to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]))
    }

    /// Channels in linear light
    pub fn to_linear(self) -> [f64; 3] {
        self.to_unit().map(srgb_to_linear)
    }

    /// Gamma-encode linear channels and clamp into 8-bit sRGB
    pub fn from_linear_clamped(linear: [f64; 3]) -> Self {
        Self::from_unit_clamped(linear.map(|c| linear_to_srgb(c.max(0.0))))
    }
}

impl Display for Rgb8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Inverse sRGB transfer function (gamma decode)
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function (gamma encode)
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb8::from_hex("#FF8800"), Ok(Rgb8::new(255, 136, 0)));
        assert_eq!(Rgb8::from_hex("ff8800"), Ok(Rgb8::new(255, 136, 0)));
        assert_eq!(Rgb8::from_hex("#f80"), Ok(Rgb8::new(255, 136, 0)));
        assert_eq!(Rgb8::from_hex("  #3b82f6 "), Ok(Rgb8::new(59, 130, 246)));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#12345", "#GGGGGG", "#1234567", "#ééé", "#+FFFFF", "red"] {
            assert!(Rgb8::from_hex(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn formats_uppercase() {
        assert_eq!(Rgb8::new(59, 130, 246).to_hex(), "#3B82F6");
        assert_eq!(Rgb8::BLACK.to_string(), "#000000");
    }

    #[test]
    fn clamps_out_of_gamut_channels() {
        assert_eq!(
            Rgb8::from_unit_clamped([1.4, -0.2, f64::NAN]),
            Rgb8::new(255, 0, 0)
        );
    }

    #[test]
    fn transfer_function_round_trips() {
        for i in 0..=255u8 {
            let c = f64::from(i) / 255.0;
            let back = linear_to_srgb(srgb_to_linear(c));
            assert!((back - c).abs() < 1e-9, "channel {i}: {back} != {c}");
        }
    }
}
