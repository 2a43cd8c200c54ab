use crate::error::{PropError, Result};
use crate::math::round_mm;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ADVANCE_RATIO_RANGE: (f64, f64) = (0.1, 0.8);

fn default_advance_ratio_range() -> (f64, f64) {
    DEFAULT_ADVANCE_RATIO_RANGE
}

/// Store identity of a geometry: diameter and pitch rounded to whole millimeters.
///
/// Ordered by diameter, then pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GeometryKey {
    pub diameter_mm: i64,
    pub pitch_mm: i64,
}

impl GeometryKey {
    pub fn new(diameter_mm: i64, pitch_mm: i64) -> Self {
        Self {
            diameter_mm,
            pitch_mm,
        }
    }

    pub fn from_dimensions(diameter_mm: f64, pitch_mm: f64) -> Self {
        Self::new(round_mm(diameter_mm), round_mm(pitch_mm))
    }

    pub fn diameter(&self) -> f64 {
        self.diameter_mm as f64
    }

    pub fn pitch(&self) -> f64 {
        self.pitch_mm as f64
    }

    pub fn pd_ratio(&self) -> f64 {
        self.pitch() / self.diameter()
    }
}

impl fmt::Display for GeometryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.diameter_mm, self.pitch_mm)
    }
}

/// One experimentally characterized propeller.
///
/// Field aliases accept the measured-database document layout
/// (`d_mm`, `p_mm`, `j_range`, `ct_r2`, `cp_r2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropellerRecord {
    #[serde(alias = "d_mm")]
    pub diameter_mm: f64,
    #[serde(alias = "p_mm")]
    pub pitch_mm: f64,
    /// CT(J), highest degree first.
    pub ct_coeffs: Vec<f64>,
    /// CP(J), highest degree first.
    pub cp_coeffs: Vec<f64>,
    #[serde(alias = "j_range", default = "default_advance_ratio_range")]
    pub advance_ratio_range: (f64, f64),
    #[serde(alias = "ct_r2", default)]
    pub r2_ct: Option<f64>,
    #[serde(alias = "cp_r2", default)]
    pub r2_cp: Option<f64>,
}

impl PropellerRecord {
    pub fn new(diameter_mm: f64, pitch_mm: f64, ct_coeffs: Vec<f64>, cp_coeffs: Vec<f64>) -> Self {
        Self {
            diameter_mm,
            pitch_mm,
            ct_coeffs,
            cp_coeffs,
            advance_ratio_range: DEFAULT_ADVANCE_RATIO_RANGE,
            r2_ct: None,
            r2_cp: None,
        }
    }

    pub fn with_advance_ratio_range(mut self, j_min: f64, j_max: f64) -> Self {
        self.advance_ratio_range = (j_min, j_max);
        self
    }

    pub fn with_fit_quality(mut self, r2_ct: f64, r2_cp: f64) -> Self {
        self.r2_ct = Some(r2_ct);
        self.r2_cp = Some(r2_cp);
        self
    }

    pub fn key(&self) -> GeometryKey {
        GeometryKey::from_dimensions(self.diameter_mm, self.pitch_mm)
    }

    pub fn pd_ratio(&self) -> f64 {
        self.pitch_mm / self.diameter_mm
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| PropError::InvalidRecord {
            key: format!("{}x{}", self.diameter_mm, self.pitch_mm),
            reason: reason.to_string(),
        };

        if !self.diameter_mm.is_finite() || self.diameter_mm <= 0.0 {
            return Err(invalid("diameter must be positive"));
        }
        if !self.pitch_mm.is_finite() || self.pitch_mm <= 0.0 {
            return Err(invalid("pitch must be positive"));
        }
        // Sub-millimeter dimensions would produce a zero key component.
        let key = self.key();
        if key.diameter_mm < 1 || key.pitch_mm < 1 {
            return Err(invalid("dimensions round to zero millimeters"));
        }
        if self.ct_coeffs.is_empty() || self.cp_coeffs.is_empty() {
            return Err(invalid("coefficient sequences must not be empty"));
        }
        if self.ct_coeffs.iter().chain(&self.cp_coeffs).any(|c| !c.is_finite()) {
            return Err(invalid("coefficients must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn apc_9x7() -> PropellerRecord {
        PropellerRecord::new(228.6, 177.8, vec![-0.1, -0.02, 0.1], vec![-0.06, 0.02, 0.045])
    }

    #[test]
    fn test_key_rounds_to_millimeters() {
        let key = apc_9x7().key();
        assert_eq!(key, GeometryKey::new(229, 178));
        assert_eq!(key.to_string(), "229x178");
    }

    #[test]
    fn test_key_ordering_is_diameter_first() {
        let mut keys = vec![
            GeometryKey::new(330, 254),
            GeometryKey::new(229, 178),
            GeometryKey::new(229, 102),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                GeometryKey::new(229, 102),
                GeometryKey::new(229, 178),
                GeometryKey::new(330, 254)
            ]
        );
    }

    #[test]
    fn test_pd_ratio_uses_raw_dimensions() {
        assert_relative_eq!(apc_9x7().pd_ratio(), 177.8 / 228.6);
    }

    #[test]
    fn test_deserialize_database_layout() {
        let json = r#"{
            "d_mm": 330.2, "p_mm": 254.0,
            "ct_coeffs": [-0.12, -0.02, 0.105],
            "cp_coeffs": [-0.08, 0.02, 0.055],
            "j_range": [0.15, 0.75],
            "ct_r2": 0.998, "cp_r2": 0.995
        }"#;
        let record: PropellerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.key(), GeometryKey::new(330, 254));
        assert_eq!(record.advance_ratio_range, (0.15, 0.75));
        assert_eq!(record.r2_ct, Some(0.998));
        assert_eq!(record.r2_cp, Some(0.995));
    }

    #[test]
    fn test_deserialize_defaults_range_and_fit() {
        let json = r#"{ "diameter_mm": 254.0, "pitch_mm": 114.3,
                        "ct_coeffs": [0.1], "cp_coeffs": [0.04] }"#;
        let record: PropellerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.advance_ratio_range, DEFAULT_ADVANCE_RATIO_RANGE);
        assert!(record.r2_ct.is_none());
        assert!(record.r2_cp.is_none());
    }

    #[test]
    fn test_validate_rejects_degenerate_records() {
        assert!(apc_9x7().validate().is_ok());

        let mut zero_pitch = apc_9x7();
        zero_pitch.pitch_mm = 0.0;
        assert!(matches!(zero_pitch.validate(), Err(PropError::InvalidRecord { .. })));

        let mut tiny = apc_9x7();
        tiny.diameter_mm = 0.4;
        assert!(tiny.validate().is_err());

        let mut empty = apc_9x7();
        empty.cp_coeffs.clear();
        assert!(empty.validate().is_err());

        let mut nan = apc_9x7();
        nan.ct_coeffs[0] = f64::NAN;
        assert!(nan.validate().is_err());
    }
}
