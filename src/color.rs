use crate::{foundation::math::round_half_up, model::Color};

/// Formats a Figma color as `#rrggbb`, or `#rrggbbaa` when alpha is present and below 1.
///
/// Returns `None` for an absent color; callers treat that as "no color", not an error.
pub fn normalize(color: Option<&Color>) -> Option<String> {
    let c = color?;
    let mut hex = format!(
        "#{:02x}{:02x}{:02x}",
        channel(c.r),
        channel(c.g),
        channel(c.b)
    );
    match c.a {
        Some(a) if a < 1.0 => hex.push_str(&format!("{:02x}", channel(a))),
        _ => {}
    }
    Some(hex)
}

fn channel(v: f64) -> u8 {
    round_half_up(v * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;
