//! Precomputed distance matrix artifact
//!
//! The artifact is a JSON object mapping region id to an object mapping
//! region id to a distance in kilometers. Either orientation of a pair
//! satisfies a lookup and self entries are optional.

use crate::io::error::{EngineError, Result, WithPath};
use crate::spatial::region::RegionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Sparse symmetric distance matrix keyed by region id
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DistanceMatrix {
    rows: BTreeMap<RegionId, BTreeMap<RegionId, f64>>,
}

/// On-disk shape; non-finite distances were written as `null` by older generators
#[derive(Deserialize)]
#[serde(transparent)]
struct RawMatrix(BTreeMap<RegionId, BTreeMap<RegionId, Option<f64>>>);

impl DistanceMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a distance under `from` -> `to`
    pub fn insert(&mut self, from: RegionId, to: RegionId, km: f64) {
        self.rows.entry(from).or_default().insert(to, km);
    }

    /// Look up a pair in either orientation
    ///
    /// A region is always 0 from itself, stored or not.
    pub fn lookup(&self, a: &RegionId, b: &RegionId) -> Option<f64> {
        let direct = |from: &RegionId, to: &RegionId| {
            self.rows.get(from).and_then(|row| row.get(to)).copied()
        };
        direct(a, b)
            .or_else(|| direct(b, a))
            .or_else(|| (a == b).then_some(0.0))
    }

    /// Number of stored directed entries
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Test if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(BTreeMap::is_empty)
    }

    /// Parse an artifact, naming `location` in any error
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MatrixLoad`] when the text is not a valid artifact
    pub fn from_json_str(text: &str, location: &str) -> Result<Self> {
        let raw: RawMatrix = serde_json::from_str(text).map_err(|e| EngineError::MatrixLoad {
            location: location.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawMatrix) -> Self {
        let rows = raw
            .0
            .into_iter()
            .map(|(from, row)| {
                let row = row
                    .into_iter()
                    .filter_map(|(to, km)| km.filter(|d| d.is_finite() && *d >= 0.0).map(|d| (to, d)))
                    .collect();
                (from, row)
            })
            .collect();
        Self { rows }
    }

    /// Read an artifact from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_path(path, "open matrix")?;
        let raw: RawMatrix =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| EngineError::MatrixLoad {
                location: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_raw(raw))
    }

    /// Write the artifact as compact JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_path(path, "create matrix")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| EngineError::FileSystem {
            path: path.to_path_buf(),
            operation: "write matrix",
            source: e.into(),
        })?;
        writer.flush().with_path(path, "flush matrix")
    }
}
