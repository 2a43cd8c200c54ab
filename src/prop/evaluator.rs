//! Thrust, power and efficiency from a resolved [`PerformanceResult`].
//!
//! The advance ratio is never checked against the result's validity range;
//! use [`PerformanceResult::is_extrapolating`] before trusting a value.

use crate::aero::Atmosphere;
use crate::math::{polyval, AIR_DENSITY_SEA_LEVEL, SECONDS_PER_MINUTE};
use crate::prop::result::PerformanceResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub advance_ratio: f64,
    pub rpm: f64,
    pub diameter_m: f64,
    /// kg/m^3
    pub air_density: f64,
}

impl OperatingPoint {
    /// Operating point at sea-level density.
    pub fn new(advance_ratio: f64, rpm: f64, diameter_m: f64) -> Self {
        Self {
            advance_ratio,
            rpm,
            diameter_m,
            air_density: AIR_DENSITY_SEA_LEVEL,
        }
    }

    /// J = V / (n D)
    pub fn from_airspeed(velocity: f64, rpm: f64, diameter_m: f64) -> Self {
        let n = rpm / SECONDS_PER_MINUTE;
        let advance_ratio = velocity / (n * diameter_m + 1e-10);
        Self::new(advance_ratio, rpm, diameter_m)
    }

    pub fn with_air_density(mut self, air_density: f64) -> Self {
        self.air_density = air_density;
        self
    }

    pub fn at_altitude(self, altitude: f64) -> Self {
        self.with_air_density(Atmosphere::at_altitude(altitude).density)
    }

    pub fn revolutions_per_second(&self) -> f64 {
        self.rpm / SECONDS_PER_MINUTE
    }
}

pub fn thrust_coefficient(result: &PerformanceResult, advance_ratio: f64) -> Option<f64> {
    result.coefficients().map(|(ct, _)| polyval(ct, advance_ratio))
}

pub fn power_coefficient(result: &PerformanceResult, advance_ratio: f64) -> Option<f64> {
    result.coefficients().map(|(_, cp)| polyval(cp, advance_ratio))
}

/// Thrust in newtons, `CT * rho * n^2 * D^4`. `None` on the fallback tier.
pub fn compute_thrust(result: &PerformanceResult, point: &OperatingPoint) -> Option<f64> {
    let ct = thrust_coefficient(result, point.advance_ratio)?;
    let n = point.revolutions_per_second();
    Some(ct * point.air_density * n * n * point.diameter_m.powi(4))
}

/// Shaft power in watts, `CP * rho * n^3 * D^5`. `None` on the fallback tier.
pub fn compute_power(result: &PerformanceResult, point: &OperatingPoint) -> Option<f64> {
    let cp = power_coefficient(result, point.advance_ratio)?;
    let n = point.revolutions_per_second();
    Some(cp * point.air_density * n.powi(3) * point.diameter_m.powi(5))
}

/// `J * CT / CP`, or 0 when CP is not positive. The fallback tier returns its
/// stored efficiency for every J.
pub fn compute_efficiency(result: &PerformanceResult, advance_ratio: f64) -> f64 {
    match result {
        PerformanceResult::Fallback(estimate) => estimate.total_efficiency,
        _ => {
            let ct = thrust_coefficient(result, advance_ratio).unwrap_or(0.0);
            let cp = power_coefficient(result, advance_ratio).unwrap_or(0.0);
            if cp > 0.0 {
                advance_ratio * ct / cp
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::result::{ExactMatch, FallbackEstimate};
    use approx::assert_relative_eq;

    fn exact(ct: Vec<f64>, cp: Vec<f64>) -> PerformanceResult {
        PerformanceResult::Exact(ExactMatch {
            ct_coeffs: ct,
            cp_coeffs: cp,
            advance_ratio_range: (0.1, 0.8),
            r2_ct: None,
            r2_cp: None,
            source_key: "330x254".to_string(),
        })
    }

    fn fallback() -> PerformanceResult {
        PerformanceResult::Fallback(FallbackEstimate { total_efficiency: 0.5 })
    }

    #[test]
    fn test_thrust_and_power_by_hand() {
        let result = exact(vec![-0.12, -0.02, 0.105], vec![-0.08, 0.02, 0.055]);
        let point = OperatingPoint::new(0.5, 6000.0, 0.33);

        let ct: f64 = -0.12 * 0.25 - 0.02 * 0.5 + 0.105;
        let cp: f64 = -0.08 * 0.25 + 0.02 * 0.5 + 0.055;
        let n: f64 = 100.0;

        assert_relative_eq!(
            compute_thrust(&result, &point).unwrap(),
            ct * 1.225 * n.powi(2) * 0.33f64.powi(4),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            compute_power(&result, &point).unwrap(),
            cp * 1.225 * n.powi(3) * 0.33f64.powi(5),
            max_relative = 1e-12
        );
        assert_relative_eq!(compute_efficiency(&result, 0.5), 0.5 * ct / cp, max_relative = 1e-12);
    }

    #[test]
    fn test_density_scales_thrust_linearly() {
        let result = exact(vec![0.1], vec![0.05]);
        let sea = OperatingPoint::new(0.3, 5000.0, 0.25);
        let high = sea.at_altitude(3000.0);
        let ratio =
            compute_thrust(&result, &high).unwrap() / compute_thrust(&result, &sea).unwrap();
        assert_relative_eq!(
            ratio,
            high.air_density / AIR_DENSITY_SEA_LEVEL,
            max_relative = 1e-12
        );
        assert!(high.air_density < sea.air_density);
    }

    #[test]
    fn test_fallback_thrust_and_power_unavailable() {
        let point = OperatingPoint::new(0.4, 8000.0, 0.3);
        assert!(compute_thrust(&fallback(), &point).is_none());
        assert!(compute_power(&fallback(), &point).is_none());
    }

    #[test]
    fn test_fallback_efficiency_independent_of_j() {
        for j in [0.0, 0.2, 0.55, 1.3, -1.0] {
            assert_eq!(compute_efficiency(&fallback(), j), 0.5);
        }
    }

    #[test]
    fn test_efficiency_guard_on_non_positive_cp() {
        // CP(J) = 0.02 - 0.1 J crosses zero at J = 0.2.
        let result = exact(vec![0.1], vec![-0.1, 0.02]);
        assert_eq!(compute_efficiency(&result, 0.2), 0.0);
        assert_eq!(compute_efficiency(&result, 0.5), 0.0);
        assert!(compute_efficiency(&result, 0.1) > 0.0);
    }

    #[test]
    fn test_from_airspeed_advance_ratio() {
        let point = OperatingPoint::from_airspeed(20.0, 8000.0, 0.33);
        assert_relative_eq!(
            point.advance_ratio,
            20.0 / (8000.0 / 60.0 * 0.33),
            max_relative = 1e-9
        );
        assert_eq!(point.air_density, AIR_DENSITY_SEA_LEVEL);

        let hover = OperatingPoint::from_airspeed(0.0, 8000.0, 0.33);
        assert_eq!(hover.advance_ratio, 0.0);
    }
}
