//! Number rendering for the keypad display.
//!
//! One rounding rule governs the whole machine: every computed value is
//! rounded to 7 fractional digits before it is displayed and before it is
//! carried as the next first operand. This bounds floating-point drift
//! across chained operations.

/// Round a computed value to 7 fractional digits.
pub fn round_result(value: f64) -> f64 {
    (value * 1e7).round() / 1e7
}

/// Render a value for the display.
///
/// Applies the rounding rule, trims trailing fractional zeros, and
/// normalizes negative zero to `"0"`.
pub fn format_number(value: f64) -> String {
    let rounded = round_result(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{:.7}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
