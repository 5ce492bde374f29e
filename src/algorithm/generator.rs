use crate::algorithm::distance::pairwise_distance_km;
use crate::io::configuration::{DEFAULT_SIMPLIFY_TOLERANCE_DEG, UNKNOWN_DISTANCE_KM};
use crate::io::matrix::DistanceMatrix;
use crate::math::geodesy::round_to_tenth;
use crate::spatial::region::World;
use crate::spatial::simplify::simplify_world;
use ndarray::Array2;
use rayon::prelude::*;
use tracing::info;

/// Parameters for offline matrix generation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Douglas-Peucker tolerance in degrees applied before any distance work
    pub simplify_tolerance_deg: f64,
    /// Value written for pairs whose every boundary sample failed
    pub unknown_distance_km: f64,
    /// Spread independent rows across the rayon thread pool
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            simplify_tolerance_deg: DEFAULT_SIMPLIFY_TOLERANCE_DEG,
            unknown_distance_km: UNKNOWN_DISTANCE_KM,
            parallel: true,
        }
    }
}

/// Precomputes the territory-inclusive distance between every pair of regions
pub struct MatrixGenerator<'a> {
    world: &'a World,
    config: GeneratorConfig,
}

impl<'a> MatrixGenerator<'a> {
    /// Create a generator over a world
    pub const fn new(world: &'a World, config: GeneratorConfig) -> Self {
        Self { world, config }
    }

    /// Compute the full pairwise matrix in kilometers
    ///
    /// Each unordered pair is computed once on simplified full geometry and
    /// mirrored; the diagonal is 0. Rows of the upper triangle are independent
    /// and may run in parallel, while mirroring happens afterwards on one thread.
    /// `on_row` is called once per finished row, from any thread.
    pub fn compute<F>(&self, on_row: F) -> Array2<f64>
    where
        F: Fn(usize) + Sync,
    {
        let simplified = simplify_world(self.world, self.config.simplify_tolerance_deg);
        let count = simplified.len();
        let unknown = self.config.unknown_distance_km;

        let upper_row = |i: usize| -> Vec<f64> {
            let row: Vec<f64> = match simplified.region_at(i) {
                Some(region_a) => ((i + 1)..count)
                    .map(|j| {
                        simplified
                            .region_at(j)
                            .and_then(|region_b| {
                                pairwise_distance_km(region_a.geometry(), region_b.geometry())
                            })
                            .unwrap_or(unknown)
                    })
                    .collect(),
                None => Vec::new(),
            };
            on_row(i);
            row
        };

        let rows: Vec<Vec<f64>> = if self.config.parallel {
            (0..count).into_par_iter().map(upper_row).collect()
        } else {
            (0..count).map(upper_row).collect()
        };

        let mut distances = Array2::<f64>::zeros((count, count));
        for (i, row) in rows.iter().enumerate() {
            for (offset, &km) in row.iter().enumerate() {
                let j = i + 1 + offset;
                if let Some(cell) = distances.get_mut([i, j]) {
                    *cell = km;
                }
                if let Some(cell) = distances.get_mut([j, i]) {
                    *cell = km;
                }
            }
        }

        distances
    }

    /// Compute the matrix and convert it to the artifact format
    ///
    /// Both orientations and the diagonal are stored, rounded to one decimal.
    pub fn generate<F>(&self, on_row: F) -> DistanceMatrix
    where
        F: Fn(usize) + Sync,
    {
        let distances = self.compute(on_row);
        let mut matrix = DistanceMatrix::new();

        for (i, region_a) in self.world.iter().enumerate() {
            for (j, region_b) in self.world.iter().enumerate() {
                if let Some(&km) = distances.get([i, j]) {
                    matrix.insert(region_a.id().clone(), region_b.id().clone(), round_to_tenth(km));
                }
            }
        }

        info!(
            regions = self.world.len(),
            entries = matrix.len(),
            "distance matrix generated"
        );
        matrix
    }
}
