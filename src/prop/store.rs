//! Immutable collection of measured propeller records keyed by rounded geometry.

use crate::error::{PropError, Result};
use crate::prop::record::{GeometryKey, PropellerRecord};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CoefficientStore {
    records: BTreeMap<GeometryKey, PropellerRecord>,
}

impl CoefficientStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from records supplied in code. Any invalid record fails the build.
    ///
    /// When two records round to the same key the first one is kept.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = PropellerRecord>,
    {
        let mut store = Self::default();
        for record in records {
            record.validate()?;
            store.insert_first(record);
        }
        Ok(store)
    }

    /// Decode a JSON object mapping `"{d}x{p}"` keys to records.
    ///
    /// Entries that are not valid records are skipped with a warning; a
    /// document that is not a JSON object is an error. Records are re-keyed
    /// by their own rounded geometry.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut store = Self::default();

        for (source_key, value) in entries {
            let record: PropellerRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping entry {}: {}", source_key, e);
                    continue;
                }
            };
            if let Err(e) = record.validate() {
                warn!("Skipping entry {}: {}", source_key, e);
                continue;
            }
            let key = record.key();
            if key.to_string() != source_key {
                debug!("Entry {} stored under {}", source_key, key);
            }
            store.insert_first(record);
        }

        Ok(store)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PropError::Io(format!("{}: {}", path.display(), e)))?;
        let store = Self::from_json_str(&text)?;
        info!("Loaded {} propeller records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Like [`Self::from_path`], but a missing file yields an empty store.
    pub fn open_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Propeller database not found at {}; all queries will use the fallback estimate",
                    path.display()
                );
                Ok(Self::empty())
            }
            _ => Self::from_path(path),
        }
    }

    fn insert_first(&mut self, record: PropellerRecord) {
        let key = record.key();
        if self.records.contains_key(&key) {
            warn!(
                "Duplicate propeller geometry {} ({} x {} mm) ignored",
                key, record.diameter_mm, record.pitch_mm
            );
            return;
        }
        self.records.insert(key, record);
    }

    pub fn get(&self, key: &GeometryKey) -> Option<&PropellerRecord> {
        self.records.get(key)
    }

    pub fn get_key_value(&self, key: &GeometryKey) -> Option<(&GeometryKey, &PropellerRecord)> {
        self.records.get_key_value(key)
    }

    pub fn contains(&self, key: &GeometryKey) -> bool {
        self.records.contains_key(key)
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GeometryKey, &PropellerRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
