//! Presentation rounding

/// Round to 2 decimal places, halves toward positive infinity
///
/// Matches the rounding used on displayed amounts (`-0.005` rounds to `-0.00`,
/// `0.005` rounds to `0.01`).
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
