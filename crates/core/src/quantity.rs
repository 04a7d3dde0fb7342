//! Quantity helpers shared by pools, decisions and summaries.

/// Quantities must be finite and non-negative to enter the engine.
pub fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Clamp a computed quantity so that negative values (and `-0.0`) never surface.
pub fn clamp_non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}
