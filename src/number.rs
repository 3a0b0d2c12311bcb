//! Numeric normalization shared by vertices, attributes and path data.

/// Residual below which a coordinate is treated as an exact integer.
pub const INTEGER_SNAP: f64 = 1e-9;

/// Formats a number in its shortest form: integral values have no decimal
/// point and negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

/// Snaps `value` to the nearest integer when it is within float noise.
pub fn snap_near_integer(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() <= INTEGER_SNAP {
        // adding 0.0 turns -0.0 into 0.0
        rounded + 0.0
    } else {
        value
    }
}

/// Rounds `value` to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor + 0.0
}
