/// Evaluate a polynomial with coefficients ordered highest degree first.
///
/// An empty coefficient slice evaluates to zero.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}
