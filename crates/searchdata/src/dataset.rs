//! In-memory dataset
//!
//! Loaded once at startup, never mutated afterwards. Malformed entries
//! are dropped at load time so one bad record cannot break every
//! search; the drop count stays observable.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::record::Record;

/// Ordered, read-only collection of records
pub struct Dataset {
    records: Vec<Record>,
    skipped: usize,
    scans: AtomicU64,
}

impl Dataset {
    /// Load a dataset from a JSON file
    ///
    /// The file must contain a JSON array. Elements that are not
    /// well-formed records are skipped and counted, see
    /// [`Dataset::skipped`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a dataset from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_str(text)?;

        let mut records = Vec::with_capacity(values.len());
        let mut skipped = 0;
        for value in values {
            match serde_json::from_value::<Record>(value) {
                Ok(record) => records.push(record),
                Err(_) => skipped += 1,
            }
        }

        let mut dataset = Self::from_records(records)?;
        dataset.skipped = skipped;
        Ok(dataset)
    }

    /// Build a dataset from records already in memory
    ///
    /// Record order is preserved. Duplicate ids are rejected.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(Error::DuplicateId(record.id));
            }
        }

        Ok(Self {
            records,
            skipped: 0,
            scans: AtomicU64::new(0),
        })
    }

    /// Iterate over every record in load order
    ///
    /// Each call counts as one full scan, see [`Dataset::scan_count`].
    pub fn scan(&self) -> impl Iterator<Item = &Record> + '_ {
        self.scans.fetch_add(1, Ordering::Relaxed);
        self.records.iter()
    }

    /// Look up a single record by id
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of records in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of malformed entries dropped at load time
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of full scans since load
    pub fn scan_count(&self) -> u64 {
        self.scans.load(Ordering::Relaxed)
    }
}
