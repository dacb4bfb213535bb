use super::*;

#[test]
fn absent_color_is_none() {
    assert_eq!(normalize(None), None);
}

#[test]
fn opaque_colors_are_six_digits() {
    assert_eq!(
        normalize(Some(&Color::rgb(1.0, 0.0, 0.0))).as_deref(),
        Some("#ff0000")
    );
    assert_eq!(
        normalize(Some(&Color::rgba(1.0, 0.0, 0.0, 1.0))).as_deref(),
        Some("#ff0000")
    );
}

#[test]
fn translucent_colors_append_alpha_byte() {
    assert_eq!(
        normalize(Some(&Color::rgba(1.0, 0.0, 0.0, 0.5))).as_deref(),
        Some("#ff000080")
    );
    assert_eq!(
        normalize(Some(&Color::rgba(0.0, 0.0, 0.0, 0.0))).as_deref(),
        Some("#00000000")
    );
}

#[test]
fn output_length_depends_only_on_alpha() {
    let samples = [0.0, 0.001, 0.2, 0.5, 0.75, 0.999, 1.0];
    for &r in &samples {
        for &a in &samples {
            let opaque = normalize(Some(&Color::rgb(r, 1.0 - r, r / 2.0))).unwrap();
            assert_eq!(opaque.len(), 7, "{opaque}");

            let with_alpha = normalize(Some(&Color::rgba(r, 1.0 - r, r / 2.0, a))).unwrap();
            let expected = if a < 1.0 { 9 } else { 7 };
            assert_eq!(with_alpha.len(), expected, "{with_alpha}");
        }
    }
}

#[test]
fn channels_are_lowercase_and_zero_padded() {
    // 0.0392 * 255 = 9.996 -> 10 -> "0a"
    let hex = normalize(Some(&Color::rgb(0.0392, 0.8, 1.0))).unwrap();
    assert_eq!(hex, "#0accff");
    assert!(hex.chars().skip(1).all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn out_of_range_channels_are_clamped() {
    assert_eq!(
        normalize(Some(&Color::rgb(1.5, -0.2, 0.0))).as_deref(),
        Some("#ff0000")
    );
}
