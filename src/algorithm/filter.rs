use crate::algorithm::cache::DistanceCache;
use crate::algorithm::candidates::CandidateSet;
use crate::io::configuration::{DEFAULT_TOLERANCE_FLOOR_KM, DEFAULT_TOLERANCE_RATIO};
use crate::io::error::{EngineError, Result, invalid_parameter};
use crate::spatial::mainland::{MainlandTable, TerritoryMode};
use crate::spatial::region::{Region, RegionId, World};
use serde::{Deserialize, Serialize};

/// A reference region and the declared distance from it to the unknown region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    /// Region the distance is measured from
    pub region: RegionId,
    /// Declared distance in kilometers; 0 means bordering or overlapping
    pub distance_km: f64,
}

impl Clue {
    /// Create a clue
    pub fn new(region: impl Into<RegionId>, distance_km: f64) -> Self {
        Self {
            region: region.into(),
            distance_km,
        }
    }
}

/// How far a resolved distance may stray from a declared one
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToleranceConfig {
    /// Absolute minimum tolerance in kilometers
    pub floor_km: f64,
    /// Fraction of the declared distance
    pub ratio: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            floor_km: DEFAULT_TOLERANCE_FLOOR_KM,
            ratio: DEFAULT_TOLERANCE_RATIO,
        }
    }
}

impl ToleranceConfig {
    /// Allowed deviation for a declared distance
    pub fn tolerance_km(&self, declared_km: f64) -> f64 {
        self.floor_km.max(declared_km * self.ratio)
    }

    /// Test a resolved distance against a declared one
    ///
    /// A declared 0 is a hard constraint: only an exact 0 passes.
    pub fn accepts(&self, declared_km: f64, resolved_km: f64) -> bool {
        if declared_km == 0.0 {
            return resolved_km == 0.0;
        }
        (resolved_km - declared_km).abs() <= self.tolerance_km(declared_km)
    }

    /// Check that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if either field is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if !(self.floor_km.is_finite() && self.floor_km >= 0.0) {
            return Err(invalid_parameter(
                "tolerance_floor_km",
                &self.floor_km,
                &"must be a finite non-negative number",
            ));
        }
        if !(self.ratio.is_finite() && self.ratio >= 0.0) {
            return Err(invalid_parameter(
                "tolerance_ratio",
                &self.ratio,
                &"must be a finite non-negative number",
            ));
        }
        Ok(())
    }
}

/// Narrows a region universe to the regions consistent with every clue
pub struct CandidateFilter<'a> {
    world: &'a World,
    mainlands: &'a MainlandTable,
    tolerance: ToleranceConfig,
}

impl<'a> CandidateFilter<'a> {
    /// Create a filter over a world and its mainland table
    pub const fn new(world: &'a World, mainlands: &'a MainlandTable, tolerance: ToleranceConfig) -> Self {
        Self {
            world,
            mainlands,
            tolerance,
        }
    }

    /// Compute the candidate set for a clue list
    ///
    /// Clue order does not matter. An empty clue list keeps the whole
    /// universe. The result depends only on the inputs, so repeated calls
    /// with the same clues return the same set.
    ///
    /// # Errors
    ///
    /// Returns an error if a clue references an unknown region or declares a
    /// negative or non-finite distance
    pub fn apply(
        &self,
        cache: &mut DistanceCache,
        clues: &[Clue],
        mode: TerritoryMode,
    ) -> Result<CandidateSet> {
        let references = self.resolve_references(clues)?;
        let mut candidates = CandidateSet::all(self.world.len());

        for (clue, reference) in clues.iter().zip(references) {
            for index in candidates.to_vec() {
                let Some(candidate) = self.world.region_at(index) else {
                    continue;
                };
                let resolved = cache.resolve(self.mainlands, candidate, reference, mode);
                if !self.tolerance.accepts(clue.distance_km, resolved) {
                    candidates.remove(index);
                }
            }

            if candidates.is_empty() {
                break;
            }
        }

        Ok(candidates)
    }

    /// Compute the candidate regions for a clue list
    ///
    /// # Errors
    ///
    /// Same conditions as [`CandidateFilter::apply`]
    pub fn candidates(
        &self,
        cache: &mut DistanceCache,
        clues: &[Clue],
        mode: TerritoryMode,
    ) -> Result<Vec<&'a Region>> {
        Ok(self.apply(cache, clues, mode)?.regions(self.world))
    }

    fn resolve_references(&self, clues: &[Clue]) -> Result<Vec<&'a Region>> {
        clues
            .iter()
            .map(|clue| {
                if !(clue.distance_km.is_finite() && clue.distance_km >= 0.0) {
                    return Err(invalid_parameter(
                        "distance",
                        &clue.distance_km,
                        &"must be a finite non-negative number of kilometers",
                    ));
                }
                self.world
                    .get(&clue.region)
                    .ok_or_else(|| EngineError::UnknownRegion {
                        id: clue.region.to_string(),
                    })
            })
            .collect()
    }
}
