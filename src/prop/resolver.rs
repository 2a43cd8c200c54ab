//! Tiered resolution of a query geometry against the measured database.
//!
//! 1. Exact rounded-key hit: measured curves returned as-is.
//! 2. Nearest record with similar pitch/diameter ratio: curves rescaled
//!    with [`crate::prop::scaling`].
//! 3. Otherwise a fixed-efficiency fallback.

use crate::config::{ModelConfig, SearchStrategy};
use crate::error::{PropError, Result};
use crate::math::relative_deviation;
use crate::prop::index::GeometryIndex;
use crate::prop::record::{GeometryKey, PropellerRecord};
use crate::prop::result::{ExactMatch, FallbackEstimate, PerformanceResult, ScaledMatch};
use crate::prop::scaling;
use crate::prop::stats::Statistics;
use crate::prop::store::CoefficientStore;
use log::debug;

/// A stored record eligible for scaling to the query geometry.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub key: &'a GeometryKey,
    pub record: &'a PropellerRecord,
    pub pd_deviation: f64,
    pub diameter_deviation: f64,
}

#[derive(Debug)]
pub struct MatchResolver {
    store: CoefficientStore,
    index: GeometryIndex,
    config: ModelConfig,
    stats: Statistics,
}

impl MatchResolver {
    pub fn new(store: CoefficientStore, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let index = GeometryIndex::build(&store);
        Ok(Self {
            store,
            index,
            config,
            stats: Statistics::new(),
        })
    }

    pub fn store(&self) -> &CoefficientStore {
        &self.store
    }

    pub fn index(&self) -> &GeometryIndex {
        &self.index
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Validate and round a query geometry.
    pub fn query_key(diameter_mm: f64, pitch_mm: f64) -> Result<GeometryKey> {
        let invalid = || PropError::InvalidGeometry {
            diameter_mm,
            pitch_mm,
        };
        let finite = diameter_mm.is_finite() && pitch_mm.is_finite();
        if !finite || diameter_mm <= 0.0 || pitch_mm <= 0.0 {
            return Err(invalid());
        }
        let key = GeometryKey::from_dimensions(diameter_mm, pitch_mm);
        if key.diameter_mm < 1 || key.pitch_mm < 1 {
            return Err(invalid());
        }
        Ok(key)
    }

    /// Resolve a geometry to an exact, scaled, or fallback estimate and
    /// count the tier used. Invalid geometry is rejected and not counted.
    pub fn resolve(&self, diameter_mm: f64, pitch_mm: f64) -> Result<PerformanceResult> {
        let query = Self::query_key(diameter_mm, pitch_mm)?;
        let result = self.resolve_key(&query)?;
        self.stats.record(result.method());
        Ok(result)
    }

    fn resolve_key(&self, query: &GeometryKey) -> Result<PerformanceResult> {
        if let Some(record) = self.store.get(query) {
            debug!("{}: exact match", query);
            return Ok(PerformanceResult::Exact(ExactMatch {
                ct_coeffs: record.ct_coeffs.clone(),
                cp_coeffs: record.cp_coeffs.clone(),
                advance_ratio_range: record.advance_ratio_range,
                r2_ct: record.r2_ct,
                r2_cp: record.r2_cp,
                source_key: query.to_string(),
            }));
        }

        if let Some(candidate) = self.find_closest(query) {
            let pd_error = relative_deviation(candidate.record.pd_ratio(), query.pd_ratio());
            // Never rejects while pd_tolerance < pd_acceptance; kept so the two
            // thresholds can be tuned independently.
            if pd_error < self.config.pd_acceptance {
                let scaled = scaling::scale(candidate.record, query.diameter(), query.pitch())?;
                debug!(
                    "{}: scaled from {} (P/D error {:.4}, diameter deviation {:.4}, factor {:.4})",
                    query,
                    candidate.key,
                    pd_error,
                    candidate.diameter_deviation,
                    scaled.scale_factor()
                );
                return Ok(PerformanceResult::Scaled(ScaledMatch {
                    scale_factor: scaled.scale_factor(),
                    ct_coeffs: scaled.ct_coeffs,
                    cp_coeffs: scaled.cp_coeffs,
                    advance_ratio_range: candidate.record.advance_ratio_range,
                    source_key: candidate.key.to_string(),
                    pd_relative_error: pd_error,
                    scaling: scaled.scaling,
                }));
            }
            debug!("{}: candidate {} rejected (P/D error {:.4})", query, candidate.key, pd_error);
        }

        debug!("{}: no comparable record, using fallback", query);
        Ok(PerformanceResult::Fallback(FallbackEstimate {
            total_efficiency: self.config.fallback_efficiency,
        }))
    }

    /// Record with the smallest relative diameter deviation among those whose
    /// P/D lies within `pd_tolerance` of the query; ties go to the smaller key.
    /// `None` unless the winner deviates in diameter by less than
    /// `max_diameter_deviation`.
    pub fn find_closest(&self, query: &GeometryKey) -> Option<Candidate<'_>> {
        let best = match self.config.search {
            SearchStrategy::Exhaustive => self.closest_among(self.store.iter(), query),
            SearchStrategy::Indexed => {
                let keys = self
                    .index
                    .ratio_candidates(query.pd_ratio(), self.config.pd_tolerance)
                    .filter_map(|key| self.store.get_key_value(key));
                self.closest_among(keys, query)
            }
        };
        best.filter(|c| c.diameter_deviation < self.config.max_diameter_deviation)
    }

    fn closest_among<'a, I>(&self, records: I, query: &GeometryKey) -> Option<Candidate<'a>>
    where
        I: Iterator<Item = (&'a GeometryKey, &'a PropellerRecord)>,
    {
        let target_pd = query.pd_ratio();
        records
            .filter_map(|(key, record)| {
                let pd_deviation = relative_deviation(record.pd_ratio(), target_pd);
                if pd_deviation > self.config.pd_tolerance {
                    return None;
                }
                Some(Candidate {
                    key,
                    record,
                    pd_deviation,
                    diameter_deviation: relative_deviation(record.diameter_mm, query.diameter()),
                })
            })
            .min_by(|a, b| {
                a.diameter_deviation
                    .total_cmp(&b.diameter_deviation)
                    .then_with(|| a.key.cmp(b.key))
            })
    }
}
