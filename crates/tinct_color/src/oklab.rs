//! Oklab, the Cartesian form of OKLCH
//!
//! Matrices are Björn Ottosson's published linear sRGB ↔ LMS and LMS′ ↔ Lab
//! transforms.

use crate::Rgb8;

/// A color in the Oklab space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Oklab {
    /// Perceptual lightness, 0.0 (black) to 1.0 (white)
    pub l: f64,
    /// Green (-) to red (+)
    pub a: f64,
    /// Blue (-) to yellow (+)
    pub b: f64,
}

impl Oklab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert linear-light sRGB channels to Oklab
    pub fn from_linear_srgb([r, g, b]: [f64; 3]) -> Self {
        // Linear sRGB → LMS
        let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
        let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
        let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

        // Cube-root nonlinearity
        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // LMS′ → Lab
        Self {
            l: 0.210_454_255_3 * l_ + 0.793_617_785_0 * m_ - 0.004_072_046_8 * s_,
            a: 1.977_998_495_1 * l_ - 2.428_592_205_0 * m_ + 0.450_593_709_9 * s_,
            b: 0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766_0 * s_,
        }
    }

    /// Convert to linear-light sRGB channels (unclamped, may leave the gamut)
    pub fn to_linear_srgb(self) -> [f64; 3] {
        // Lab → LMS′
        let l_ = self.l + 0.396_337_777_4 * self.a + 0.215_803_757_3 * self.b;
        let m_ = self.l - 0.105_561_345_8 * self.a - 0.063_854_172_8 * self.b;
        let s_ = self.l - 0.089_484_177_5 * self.a - 1.291_485_548_0 * self.b;

        // Undo cube root
        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        // LMS → linear sRGB
        [
            4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
            -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
            -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
        ]
    }

    pub fn from_rgb8(rgb: Rgb8) -> Self {
        Self::from_linear_srgb(rgb.to_linear())
    }

    /// Convert to 8-bit sRGB, clamping out-of-gamut channels
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8::from_linear_clamped(self.to_linear_srgb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_and_black_are_the_lightness_extremes() {
        let white = Oklab::from_rgb8(Rgb8::WHITE);
        assert!((white.l - 1.0).abs() < 1e-6);
        assert!(white.a.abs() < 1e-6 && white.b.abs() < 1e-6);

        let black = Oklab::from_rgb8(Rgb8::BLACK);
        assert!(black.l.abs() < 1e-9);
    }

    #[test]
    fn red_matches_reference_values() {
        // Reference: oklab(0.62796 0.22486 0.12585)
        let red = Oklab::from_rgb8(Rgb8::new(255, 0, 0));
        assert!((red.l - 0.627_96).abs() < 1e-3, "{red:?}");
        assert!((red.a - 0.224_86).abs() < 1e-3, "{red:?}");
        assert!((red.b - 0.125_85).abs() < 1e-3, "{red:?}");
    }

    #[test]
    fn inverse_is_exact_for_a_grid() {
        for r in (0..=255u8).step_by(51) {
            for g in (0..=255u8).step_by(51) {
                for b in (0..=255u8).step_by(51) {
                    let rgb = Rgb8::new(r, g, b);
                    assert_eq!(Oklab::from_rgb8(rgb).to_rgb8(), rgb);
                }
            }
        }
    }
}
