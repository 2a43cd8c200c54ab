use crate::error::{PropError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the resolver walks the store when no exact key matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Visit every stored record in key order.
    #[default]
    Exhaustive,
    /// Visit only the pitch/diameter ratio buckets that can hold an eligible record.
    Indexed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Max relative P/D deviation for a record to be a scaling candidate.
    pub pd_tolerance: f64,
    /// Winning candidate must deviate in diameter by strictly less than this.
    pub max_diameter_deviation: f64,
    /// P/D relative error below which a candidate is accepted for scaling.
    pub pd_acceptance: f64,
    /// Total efficiency reported by the fallback tier.
    pub fallback_efficiency: f64,
    pub search: SearchStrategy,
    /// Measured CT/CP document. `None` starts with an empty store.
    pub database_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pd_tolerance: 0.05,
            max_diameter_deviation: 0.30,
            pd_acceptance: 0.15,
            fallback_efficiency: 0.50,
            search: SearchStrategy::Exhaustive,
            database_path: None,
        }
    }
}

impl ModelConfig {
    pub fn indexed() -> Self {
        Self {
            search: SearchStrategy::Indexed,
            ..Self::default()
        }
    }

    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("pd_tolerance", self.pd_tolerance),
            ("max_diameter_deviation", self.max_diameter_deviation),
            ("pd_acceptance", self.pd_acceptance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PropError::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        let efficiency = self.fallback_efficiency;
        if !efficiency.is_finite() || !(0.0..=1.0).contains(&efficiency) {
            return Err(PropError::InvalidConfig(format!(
                "fallback_efficiency must lie in [0, 1], got {}",
                self.fallback_efficiency
            )));
        }
        Ok(())
    }
}
