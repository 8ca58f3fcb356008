/// Sum of all values; +0 for an empty slice.
pub fn sum(values: &[f64]) -> f64 {
    // `Iterator::sum` on floats starts from -0.0.
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// Rounds half away from zero at `places` digits after the decimal point.
pub fn round(value: f64, places: i32) -> f64 {
    let multiplier = 10f64.powi(places);
    (value * multiplier).round() / multiplier
}

/// Rounds a weight for display.
/// Below 1 unit keeps one decimal (yeast, spices); otherwise whole units.
pub fn round_weight(weight: f64) -> f64 {
    if weight < 1.0 {
        round(weight, 1)
    } else {
        weight.round()
    }
}

/* ===========================
Unit tests
=========================== */
