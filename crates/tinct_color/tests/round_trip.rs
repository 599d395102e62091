use tinct_color::{hex_to_oklch, oklch_to_hex, Oklch, Rgb8};

fn max_channel_error(a: Rgb8, b: Rgb8) -> u8 {
    [a.r.abs_diff(b.r), a.g.abs_diff(b.g), a.b.abs_diff(b.b)]
        .into_iter()
        .max()
        .unwrap_or(0)
}

#[test]
fn css_round_trip_stays_within_one_step() {
    // Neutrals and low-chroma brand colors, where the 2-decimal lightness
    // rounding of the CSS form stays below one 8-bit step.
    let samples = [
        "#000000", "#FFFFFF", "#808080", "#F5F5F5", "#262626", "#D4D4D4", "#FACC15", "#123456",
        "#1E293B", "#09090B", "#18181B", "#71717A",
    ];

    for hex in samples {
        let oklch = hex_to_oklch(hex);
        let back = oklch_to_hex(&oklch);
        let err = max_channel_error(
            Rgb8::from_hex(hex).unwrap(),
            Rgb8::from_hex(&back).unwrap(),
        );
        assert!(err <= 1, "{hex} -> {oklch} -> {back} (off by {err})");
    }
}

#[test]
fn typed_round_trip_is_exact_across_the_gamut() {
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(15) {
            for b in (0..=255u8).step_by(15) {
                let rgb = Rgb8::new(r, g, b);
                let back = Oklch::from_rgb8(rgb).to_rgb8();
                assert!(
                    max_channel_error(rgb, back) <= 1,
                    "{rgb} -> {back}"
                );
            }
        }
    }
}

#[test]
fn grays_never_produce_nan_hue() {
    for v in (0..=255u8).step_by(5) {
        let gray = Rgb8::new(v, v, v);
        let oklch = Oklch::from_rgb8(gray);
        assert!(!oklch.h.is_nan());
        assert_eq!(oklch.h, 0.0, "{gray}");
        assert!(hex_to_oklch(&gray.to_hex()).ends_with(" 0 0)"), "{gray}");
    }
}

#[test]
fn hex_output_is_uppercase() {
    let hex = oklch_to_hex("oklch(0.62 0.188 260)");
    assert_eq!(hex, hex.to_uppercase());
}
