//! Proximity lookup structures over a [`CoefficientStore`].

use crate::math::round_mm;
use crate::prop::record::GeometryKey;
use crate::prop::store::CoefficientStore;
use std::collections::BTreeMap;

/// Ratio bucket in hundredths, i.e. P/D rounded to 2 decimals.
pub fn ratio_bucket(pd_ratio: f64) -> i64 {
    (pd_ratio * 100.0).round_ties_even() as i64
}

#[derive(Debug, Clone, Default)]
pub struct GeometryIndex {
    by_diameter: BTreeMap<i64, Vec<GeometryKey>>,
    by_ratio: BTreeMap<i64, Vec<GeometryKey>>,
}

impl GeometryIndex {
    pub fn build(store: &CoefficientStore) -> Self {
        let mut index = Self::default();
        for (key, record) in store.iter() {
            index
                .by_diameter
                .entry(round_mm(record.diameter_mm))
                .or_default()
                .push(*key);
            index
                .by_ratio
                .entry(ratio_bucket(record.pd_ratio()))
                .or_default()
                .push(*key);
        }
        index
    }

    pub fn with_diameter(&self, diameter_mm: f64) -> &[GeometryKey] {
        self.by_diameter
            .get(&round_mm(diameter_mm))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn with_ratio(&self, pd_ratio: f64) -> &[GeometryKey] {
        self.by_ratio
            .get(&ratio_bucket(pd_ratio))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Keys whose ratio bucket can hold a record within `tolerance` relative
    /// P/D deviation of `target_ratio`. A superset: callers still apply the
    /// exact eligibility test. One extra bucket on each side absorbs rounding
    /// at the bucket edges.
    pub fn ratio_candidates(
        &self,
        target_ratio: f64,
        tolerance: f64,
    ) -> impl Iterator<Item = &GeometryKey> + '_ {
        // Buckets saturate at the i64 range for extreme ratios.
        let low = ratio_bucket(target_ratio * (1.0 - tolerance)).saturating_sub(1);
        let high = ratio_bucket(target_ratio * (1.0 + tolerance)).saturating_add(1);
        self.by_ratio
            .range(low..=high)
            .flat_map(|(_, keys)| keys.iter())
    }

    pub fn diameter_count(&self) -> usize {
        self.by_diameter.len()
    }

    pub fn ratio_bucket_count(&self) -> usize {
        self.by_ratio.len()
    }
}
