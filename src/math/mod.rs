pub mod polynomial;

pub use polynomial::polyval;

pub const GRAVITY: f64 = 9.81;
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Round a length to whole millimeters, ties to even.
pub fn round_mm(value_mm: f64) -> i64 {
    value_mm.round_ties_even() as i64
}

/// `|value - reference| / reference`. Caller guarantees `reference > 0`.
pub fn relative_deviation(value: f64, reference: f64) -> f64 {
    (value - reference).abs() / reference
}
