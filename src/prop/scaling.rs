//! Reynolds-number correction of measured CT/CP curves.
//!
//! Curves are transferred to a new geometry at an assumed constant rotational
//! speed. Under that assumption the local Reynolds number scales with
//! `pitch * diameter`, so only the ratio `Re_target / Re_base` matters. The
//! correction exponent depends on the flow regime: laminar separation
//! dominates below 50k and fades out by 100k.

use crate::error::{PropError, Result};
use crate::prop::record::PropellerRecord;
use serde::{Deserialize, Serialize};

pub const LAMINAR_LIMIT: f64 = 50_000.0;
pub const TURBULENT_LIMIT: f64 = 100_000.0;

const CT_EXPONENT_LAMINAR: f64 = 0.15;
const CT_EXPONENT_TURBULENT: f64 = 0.08;
const CP_EXPONENT_LAMINAR: f64 = 0.08;
const CP_EXPONENT_TURBULENT: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    Laminar,      // Re < 50k
    Transitional, // 50k <= Re < 100k
    Turbulent,    // Re >= 100k
}

impl FlowRegime {
    pub fn from_reynolds(re: f64) -> Self {
        if re < LAMINAR_LIMIT {
            FlowRegime::Laminar
        } else if re < TURBULENT_LIMIT {
            FlowRegime::Transitional
        } else {
            FlowRegime::Turbulent
        }
    }
}

/// Relative Reynolds proxy. Rotational speed and air properties cancel in the ratio.
pub fn reynolds_proxy(diameter_mm: f64, pitch_mm: f64) -> f64 {
    pitch_mm * diameter_mm
}

fn regime_exponent(re_avg: f64, laminar: f64, turbulent: f64) -> f64 {
    match FlowRegime::from_reynolds(re_avg) {
        FlowRegime::Laminar => laminar,
        FlowRegime::Transitional => {
            let fraction = (re_avg - LAMINAR_LIMIT) / (TURBULENT_LIMIT - LAMINAR_LIMIT);
            laminar - (laminar - turbulent) * fraction
        }
        FlowRegime::Turbulent => turbulent,
    }
}

/// CT exponent n(Re_avg): 0.15 laminar, 0.08 turbulent, linear in between.
pub fn ct_exponent(re_avg: f64) -> f64 {
    regime_exponent(re_avg, CT_EXPONENT_LAMINAR, CT_EXPONENT_TURBULENT)
}

/// CP exponent m(Re_avg): 0.08 laminar, 0.04 turbulent, linear in between.
pub fn cp_exponent(re_avg: f64) -> f64 {
    regime_exponent(re_avg, CP_EXPONENT_LAMINAR, CP_EXPONENT_TURBULENT)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReynoldsScaling {
    pub re_base: f64,
    pub re_target: f64,
    pub regime: FlowRegime,
    pub n_ct: f64,
    pub n_cp: f64,
    pub ct_factor: f64,
    pub cp_factor: f64,
}

impl ReynoldsScaling {
    pub fn between(base_d: f64, base_p: f64, target_d: f64, target_p: f64) -> Result<Self> {
        if !(target_d > 0.0 && target_p > 0.0) {
            return Err(PropError::InvalidGeometry {
                diameter_mm: target_d,
                pitch_mm: target_p,
            });
        }
        let re_base = reynolds_proxy(base_d, base_p);
        if !(re_base > 0.0 && re_base.is_finite()) {
            return Err(PropError::DegenerateReynolds { re_base });
        }
        let re_target = reynolds_proxy(target_d, target_p);

        let re_avg = (re_base + re_target) / 2.0;
        let n_ct = ct_exponent(re_avg);
        let n_cp = cp_exponent(re_avg);

        let re_ratio = re_target / re_base;

        Ok(Self {
            re_base,
            re_target,
            regime: FlowRegime::from_reynolds(re_avg),
            n_ct,
            n_cp,
            ct_factor: re_ratio.powf(-n_ct),
            cp_factor: re_ratio.powf(-n_cp),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledCoefficients {
    pub ct_coeffs: Vec<f64>,
    pub cp_coeffs: Vec<f64>,
    pub scaling: ReynoldsScaling,
}

impl ScaledCoefficients {
    /// The CT amplitude factor.
    pub fn scale_factor(&self) -> f64 {
        self.scaling.ct_factor
    }
}

/// Rescale `base` to the target geometry. Every coefficient of a curve is
/// multiplied by the same factor, so the curve shape is preserved.
pub fn scale(
    base: &PropellerRecord,
    target_diameter_mm: f64,
    target_pitch_mm: f64,
) -> Result<ScaledCoefficients> {
    let scaling = ReynoldsScaling::between(
        base.diameter_mm,
        base.pitch_mm,
        target_diameter_mm,
        target_pitch_mm,
    )?;

    let ct_coeffs = base.ct_coeffs.iter().map(|c| c * scaling.ct_factor).collect();
    let cp_coeffs = base.cp_coeffs.iter().map(|c| c * scaling.cp_factor).collect();

    Ok(ScaledCoefficients {
        ct_coeffs,
        cp_coeffs,
        scaling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn apc_9x7() -> PropellerRecord {
        PropellerRecord::new(228.6, 177.8, vec![-0.1, -0.02, 0.1], vec![-0.06, 0.02, 0.045])
    }

    #[test]
    fn test_flow_regime_boundaries() {
        assert_eq!(FlowRegime::from_reynolds(49_999.0), FlowRegime::Laminar);
        assert_eq!(FlowRegime::from_reynolds(50_000.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::from_reynolds(99_999.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::from_reynolds(100_000.0), FlowRegime::Turbulent);
    }

    #[test]
    fn test_exponents_continuous_at_boundaries() {
        assert_relative_eq!(ct_exponent(50_000.0), 0.15);
        assert_relative_eq!(ct_exponent(100_000.0), 0.08);
        assert_relative_eq!(ct_exponent(LAMINAR_LIMIT - 1e-6), 0.15);
        assert_relative_eq!(ct_exponent(TURBULENT_LIMIT - 1e-6), 0.08, epsilon = 1e-9);

        assert_relative_eq!(cp_exponent(50_000.0), 0.08);
        assert_relative_eq!(cp_exponent(100_000.0), 0.04);
        assert_relative_eq!(cp_exponent(TURBULENT_LIMIT - 1e-6), 0.04, epsilon = 1e-9);
    }

    #[test]
    fn test_exponents_transition_midpoint() {
        assert_relative_eq!(ct_exponent(75_000.0), 0.115, epsilon = 1e-12);
        assert_relative_eq!(cp_exponent(75_000.0), 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_exponents_monotone_non_increasing() {
        let mut prev_ct = f64::INFINITY;
        let mut prev_cp = f64::INFINITY;
        for step in 0..=300 {
            let re = 1_000.0 * step as f64;
            let (n, m) = (ct_exponent(re), cp_exponent(re));
            assert!(n <= prev_ct + 1e-15, "n_ct increased at Re={}", re);
            assert!(m <= prev_cp + 1e-15, "n_cp increased at Re={}", re);
            assert!((0.08..=0.15).contains(&n));
            assert!((0.04..=0.08).contains(&m));
            prev_ct = n;
            prev_cp = m;
        }
    }

    #[test]
    fn test_scale_to_own_geometry_is_identity() {
        let base = apc_9x7();
        let scaled = scale(&base, base.diameter_mm, base.pitch_mm).unwrap();
        assert_eq!(scaled.scale_factor(), 1.0);
        assert_eq!(scaled.scaling.cp_factor, 1.0);
        assert_eq!(scaled.ct_coeffs, base.ct_coeffs);
        assert_eq!(scaled.cp_coeffs, base.cp_coeffs);
    }

    #[test]
    fn test_scale_by_hand() {
        let base = apc_9x7();
        let scaled = scale(&base, 240.0, 187.0).unwrap();

        let re_base: f64 = 228.6 * 177.8;
        let re_target: f64 = 240.0 * 187.0;
        assert_relative_eq!(scaled.scaling.re_base, re_base);
        assert_relative_eq!(scaled.scaling.re_target, re_target);
        // Average is about 42.8k: laminar exponents.
        assert_eq!(scaled.scaling.regime, FlowRegime::Laminar);
        assert_eq!(scaled.scaling.n_ct, 0.15);
        assert_eq!(scaled.scaling.n_cp, 0.08);

        let ct_factor = (re_target / re_base).powf(-0.15);
        let cp_factor = (re_target / re_base).powf(-0.08);
        assert_relative_eq!(scaled.scale_factor(), ct_factor);
        assert!(scaled.scale_factor() < 1.0);
        for (s, b) in scaled.ct_coeffs.iter().zip(&base.ct_coeffs) {
            assert_relative_eq!(*s, b * ct_factor);
        }
        for (s, b) in scaled.cp_coeffs.iter().zip(&base.cp_coeffs) {
            assert_relative_eq!(*s, b * cp_factor);
        }
    }

    #[test]
    fn test_scale_shares_average_reynolds_between_exponents() {
        // Base 254x254 (64.5k) to 330x330 (108.9k): average 86.7k is transitional.
        let base = PropellerRecord::new(254.0, 254.0, vec![0.1], vec![0.05]);
        let scaled = scale(&base, 330.0, 330.0).unwrap();
        let re_avg = (254.0 * 254.0 + 330.0 * 330.0) / 2.0;
        assert_eq!(scaled.scaling.regime, FlowRegime::Transitional);
        assert_relative_eq!(scaled.scaling.n_ct, ct_exponent(re_avg));
        assert_relative_eq!(scaled.scaling.n_cp, cp_exponent(re_avg));
    }

    #[test]
    fn test_scale_rejects_degenerate_inputs() {
        let base = apc_9x7();
        assert!(matches!(scale(&base, 0.0, 150.0), Err(PropError::InvalidGeometry { .. })));
        assert!(matches!(scale(&base, 200.0, -1.0), Err(PropError::InvalidGeometry { .. })));

        let mut flat = apc_9x7();
        flat.pitch_mm = 0.0;
        assert!(matches!(
            scale(&flat, 240.0, 187.0),
            Err(PropError::DegenerateReynolds { .. })
        ));
    }
}
