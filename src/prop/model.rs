use crate::config::ModelConfig;
use crate::error::Result;
use crate::prop::evaluator::{self, OperatingPoint};
use crate::prop::resolver::MatchResolver;
use crate::prop::result::PerformanceResult;
use crate::prop::stats::{StatisticsCounts, StatisticsReport};
use crate::prop::store::CoefficientStore;
use log::warn;

/// Entry point for propulsion sizing: resolves geometries against the
/// measured database and evaluates the resulting curves.
///
/// Read-only after construction apart from the query counters, so a single
/// model can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct PropellerModel {
    resolver: MatchResolver,
}

impl PropellerModel {
    pub fn new(store: CoefficientStore, config: ModelConfig) -> Result<Self> {
        Ok(Self {
            resolver: MatchResolver::new(store, config)?,
        })
    }

    /// Load the store from `config.database_path`. A missing path or file
    /// gives an empty store, so every query resolves to the fallback tier.
    pub fn from_config(config: ModelConfig) -> Result<Self> {
        let store = match &config.database_path {
            Some(path) => CoefficientStore::open_or_empty(path)?,
            None => {
                warn!(
                    "No propeller database configured; all queries will use the fallback estimate"
                );
                CoefficientStore::empty()
            }
        };
        Self::new(store, config)
    }

    pub fn get_performance(&self, diameter_mm: f64, pitch_mm: f64) -> Result<PerformanceResult> {
        self.resolver.resolve(diameter_mm, pitch_mm)
    }

    pub fn compute_thrust(
        &self,
        result: &PerformanceResult,
        point: &OperatingPoint,
    ) -> Option<f64> {
        evaluator::compute_thrust(result, point)
    }

    pub fn compute_power(&self, result: &PerformanceResult, point: &OperatingPoint) -> Option<f64> {
        evaluator::compute_power(result, point)
    }

    pub fn compute_efficiency(&self, result: &PerformanceResult, advance_ratio: f64) -> f64 {
        evaluator::compute_efficiency(result, advance_ratio)
    }

    pub fn get_statistics(&self) -> StatisticsReport {
        self.resolver.statistics().report()
    }

    pub fn statistics_counts(&self) -> StatisticsCounts {
        self.resolver.statistics().counts()
    }

    pub fn reset_statistics(&self) {
        self.resolver.statistics().reset();
    }

    pub fn store(&self) -> &CoefficientStore {
        self.resolver.store()
    }

    pub fn config(&self) -> &ModelConfig {
        self.resolver.config()
    }

    pub fn resolver(&self) -> &MatchResolver {
        &self.resolver
    }
}
