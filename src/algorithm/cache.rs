use crate::algorithm::distance::pairwise_distance_km;
use crate::io::configuration::UNKNOWN_DISTANCE_KM;
use crate::io::matrix::DistanceMatrix;
use crate::spatial::mainland::{MainlandTable, TerritoryMode};
use crate::spatial::region::{Region, RegionId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// Order-independent key for a region pair under one territory mode
///
/// The two ids are stored sorted, so `(A, B)` and `(B, A)` share an entry.
/// The mode is part of the key because a pair has one distance between
/// mainlands and another between full geometries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PairKey {
    first: RegionId,
    second: RegionId,
    mode: TerritoryMode,
}

impl PairKey {
    /// Create the canonical key for a pair
    pub fn new(a: &RegionId, b: &RegionId, mode: TerritoryMode) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.clone(),
            second: second.clone(),
            mode,
        }
    }

    /// Lexicographically smaller id
    pub const fn first(&self) -> &RegionId {
        &self.first
    }

    /// Lexicographically larger id
    pub const fn second(&self) -> &RegionId {
        &self.second
    }

    /// Territory mode of the query
    pub const fn mode(&self) -> TerritoryMode {
        self.mode
    }
}

/// Two-tier distance resolver: a precomputed matrix plus a runtime memo
///
/// The matrix is built from full geometries, so it only answers
/// territory-inclusive queries. Everything else is computed on demand and
/// memoized for the lifetime of the cache; entries are never evicted.
pub struct DistanceCache {
    matrix: Option<Arc<DistanceMatrix>>,
    memo: HashMap<PairKey, f64>,
    unknown_distance_km: f64,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Where resolved distances came from
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Answered from the runtime memo
    pub hits: usize,
    /// Answered from the precomputed matrix
    pub matrix_hits: usize,
    /// Computed from geometry
    pub misses: usize,
}

impl Default for DistanceCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DistanceCache {
    /// Create a cache, optionally backed by a precomputed matrix
    pub fn new(matrix: Option<Arc<DistanceMatrix>>) -> Self {
        Self {
            matrix,
            memo: HashMap::new(),
            unknown_distance_km: UNKNOWN_DISTANCE_KM,
            stats: CacheStats::default(),
        }
    }

    /// Override the distance reported for pairs whose computation failed entirely
    #[must_use]
    pub const fn with_unknown_distance(mut self, km: f64) -> Self {
        self.unknown_distance_km = km;
        self
    }

    /// Test if a precomputed matrix backs this cache
    pub const fn has_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    /// Number of memoized pairs
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Test if nothing has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Memoized distance for a key, if resolved before
    pub fn cached(&self, key: &PairKey) -> Option<f64> {
        self.memo.get(key).copied()
    }

    /// Resolve the distance between two regions in kilometers
    ///
    /// Lookup order: runtime memo, then (territory-inclusive only) the
    /// precomputed matrix in either orientation, then geometric computation on
    /// mainland or full geometry. Matrix and computed answers are memoized
    /// under the canonical pair key, so `resolve(a, b)` always equals
    /// `resolve(b, a)` for the same mode.
    pub fn resolve(
        &mut self,
        mainlands: &MainlandTable,
        a: &Region,
        b: &Region,
        mode: TerritoryMode,
    ) -> f64 {
        let key = PairKey::new(a.id(), b.id(), mode);

        match self.memo.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                *entry.get()
            }
            Entry::Vacant(entry) => {
                let key = entry.key();
                let stored = if mode.includes_territories() {
                    self.matrix
                        .as_deref()
                        .and_then(|matrix| matrix.lookup(key.first(), key.second()))
                } else {
                    None
                };

                let km = if let Some(km) = stored {
                    self.stats.matrix_hits += 1;
                    km
                } else {
                    self.stats.misses += 1;
                    if a.id() == b.id() {
                        0.0
                    } else {
                        // Compute in canonical order so either call order yields identical bits
                        let (first, second) = if a.id() <= b.id() { (a, b) } else { (b, a) };
                        pairwise_distance_km(
                            mainlands.geometry_for(first, mode),
                            mainlands.geometry_for(second, mode),
                        )
                        .unwrap_or(self.unknown_distance_km)
                    }
                };

                *entry.insert(km)
            }
        }
    }
}
