/// Truncate (floor) a value to two decimal places.
pub fn truncate_to_hundredths(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Transit time for `distance` at `speed`, truncated to two decimals.
pub fn travel_time(distance: f64, speed: f64) -> f64 {
    truncate_to_hundredths(distance / speed)
}
