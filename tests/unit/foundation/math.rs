use super::*;

#[test]
fn round_half_up_matches_figma_export_rounding() {
    assert_eq!(round_half_up(10.6), 11.0);
    assert_eq!(round_half_up(10.5), 11.0);
    assert_eq!(round_half_up(10.4), 10.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(round_half_up(0.0), 0.0);
}

#[test]
fn json_number_prefers_integers() {
    assert_eq!(json_number(16.0), serde_json::json!(16));
    assert_eq!(json_number(-4.0), serde_json::json!(-4));
    assert_eq!(json_number(1.5), serde_json::json!(1.5));
    assert!(json_number(16.0).is_i64());
}

#[test]
fn json_number_maps_non_finite_to_null() {
    assert!(json_number(f64::NAN).is_null());
    assert!(json_number(f64::INFINITY).is_null());
}
