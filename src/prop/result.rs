use crate::prop::scaling::ReynoldsScaling;
use serde::{Deserialize, Serialize};

/// Confidence label attached to an estimate by the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    High,
    Medium,
    Low,
}

/// Which resolution path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    ExactMatch,
    ScaledMatch,
    SimpleFallback,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::ExactMatch => "exact_match",
            Method::ScaledMatch => "scaled_match",
            Method::SimpleFallback => "simple_fallback",
        }
    }

    pub fn accuracy(&self) -> Accuracy {
        match self {
            Method::ExactMatch => Accuracy::High,
            Method::ScaledMatch => Accuracy::Medium,
            Method::SimpleFallback => Accuracy::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactMatch {
    pub ct_coeffs: Vec<f64>,
    pub cp_coeffs: Vec<f64>,
    pub advance_ratio_range: (f64, f64),
    pub r2_ct: Option<f64>,
    pub r2_cp: Option<f64>,
    pub source_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledMatch {
    pub ct_coeffs: Vec<f64>,
    pub cp_coeffs: Vec<f64>,
    /// Validity range of the source record; not rescaled.
    pub advance_ratio_range: (f64, f64),
    pub source_key: String,
    pub pd_relative_error: f64,
    /// CT amplitude factor, `(Re_target / Re_base)^(-n_ct)`.
    pub scale_factor: f64,
    pub scaling: ReynoldsScaling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackEstimate {
    pub total_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum PerformanceResult {
    #[serde(rename = "exact_match")]
    Exact(ExactMatch),
    #[serde(rename = "scaled_match")]
    Scaled(ScaledMatch),
    #[serde(rename = "simple_fallback")]
    Fallback(FallbackEstimate),
}

impl PerformanceResult {
    pub fn method(&self) -> Method {
        match self {
            PerformanceResult::Exact(_) => Method::ExactMatch,
            PerformanceResult::Scaled(_) => Method::ScaledMatch,
            PerformanceResult::Fallback(_) => Method::SimpleFallback,
        }
    }

    pub fn accuracy(&self) -> Accuracy {
        self.method().accuracy()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PerformanceResult::Fallback(_))
    }

    /// CT and CP coefficients, `None` on the fallback tier.
    pub fn coefficients(&self) -> Option<(&[f64], &[f64])> {
        match self {
            PerformanceResult::Exact(m) => Some((&m.ct_coeffs, &m.cp_coeffs)),
            PerformanceResult::Scaled(m) => Some((&m.ct_coeffs, &m.cp_coeffs)),
            PerformanceResult::Fallback(_) => None,
        }
    }

    pub fn advance_ratio_range(&self) -> Option<(f64, f64)> {
        match self {
            PerformanceResult::Exact(m) => Some(m.advance_ratio_range),
            PerformanceResult::Scaled(m) => Some(m.advance_ratio_range),
            PerformanceResult::Fallback(_) => None,
        }
    }

    pub fn source_key(&self) -> Option<&str> {
        match self {
            PerformanceResult::Exact(m) => Some(&m.source_key),
            PerformanceResult::Scaled(m) => Some(&m.source_key),
            PerformanceResult::Fallback(_) => None,
        }
    }

    /// True when `advance_ratio` lies outside the measured validity range.
    /// The fallback tier has no range and never reports extrapolation.
    pub fn is_extrapolating(&self, advance_ratio: f64) -> bool {
        match self.advance_ratio_range() {
            Some((j_min, j_max)) => advance_ratio < j_min || advance_ratio > j_max,
            None => false,
        }
    }
}
