/// Rounds half-way values toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// This is the rounding designers see in Figma's own exports, and it differs from
/// [`f64::round`] for negative half-way values.
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Emits `v` as a JSON number, using an integer when the value has no fractional part.
///
/// Non-finite values have no JSON representation and map to `null`.
pub(crate) fn json_number(v: f64) -> serde_json::Value {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.007_199_254_740_992e15 {
        serde_json::Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
