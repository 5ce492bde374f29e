//! Request handling state: not loaded until a successful INIT, then ready

use crate::algorithm::cache::{CacheStats, DistanceCache};
use crate::algorithm::filter::{CandidateFilter, Clue, ToleranceConfig};
use crate::engine::protocol::{Request, Response};
use crate::io::configuration::UNKNOWN_DISTANCE_KM;
use crate::io::error::{EngineError, Result};
use crate::io::geojson::parse_world;
use crate::io::matrix::DistanceMatrix;
use crate::io::source::DataSource;
use crate::spatial::mainland::{MainlandTable, TerritoryMode};
use crate::spatial::region::{Region, World};
use std::sync::Arc;
use tracing::{info, warn};

/// Tunables applied to every filter request of a session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Tolerance rule for non-zero clues
    pub tolerance: ToleranceConfig,
    /// Distance reported for pairs whose computation failed entirely
    pub unknown_distance_km: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tolerance: ToleranceConfig::default(),
            unknown_distance_km: UNKNOWN_DISTANCE_KM,
        }
    }
}

/// Everything prepared by a successful INIT
///
/// The world and mainland table are immutable and shareable; the cache is
/// the only state that changes afterwards, and only by appending.
struct LoadedData {
    world: Arc<World>,
    mainlands: Arc<MainlandTable>,
    cache: DistanceCache,
}

/// Sequential request handler owning all engine state
///
/// A session is driven by exactly one caller at a time (see
/// [`EngineWorker`](crate::engine::worker::EngineWorker)), which is what
/// lets the distance cache mutate without locks.
pub struct Session<S> {
    source: S,
    config: SessionConfig,
    loaded: Option<LoadedData>,
}

impl<S: DataSource> Session<S> {
    /// Create an unloaded session reading documents from `source`
    pub fn new(source: S) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    /// Create an unloaded session with explicit tunables
    pub const fn with_config(source: S, config: SessionConfig) -> Self {
        Self {
            source,
            config,
            loaded: None,
        }
    }

    /// Test if INIT has succeeded
    pub const fn is_ready(&self) -> bool {
        self.loaded.is_some()
    }

    /// Shared handle to the loaded universe
    pub fn world(&self) -> Option<Arc<World>> {
        self.loaded.as_ref().map(|loaded| Arc::clone(&loaded.world))
    }

    /// Shared handle to the mainland side table
    pub fn mainlands(&self) -> Option<Arc<MainlandTable>> {
        self.loaded
            .as_ref()
            .map(|loaded| Arc::clone(&loaded.mainlands))
    }

    /// Distance cache statistics since the last INIT
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.loaded.as_ref().map(|loaded| loaded.cache.stats)
    }

    /// Test if the last INIT found a usable distance matrix
    pub fn has_matrix(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|loaded| loaded.cache.has_matrix())
    }

    /// Handle one request, turning every failure into an ERROR response
    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Init {
                world_url,
                distances_url,
            } => match self.init(&world_url, distances_url.as_deref()) {
                Ok(world) => Response::ready(world.iter()),
                Err(error) => {
                    warn!(%error, "INIT failed");
                    Response::error(&error)
                }
            },
            Request::Filter {
                clues,
                include_territories,
            } => {
                let clues: Vec<Clue> = clues.iter().map(|clue| clue.to_clue()).collect();
                match self.filter(&clues, TerritoryMode::from(include_territories)) {
                    Ok(candidates) => Response::candidates(candidates),
                    Err(error) => Response::error(&error),
                }
            }
        }
    }

    /// Load the universe and, best effort, the distance matrix
    ///
    /// A failure leaves any previously loaded data in place. A missing or
    /// unparsable matrix is logged and the session runs fully dynamic.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorldLoad`] if the geometry cannot be fetched
    /// or parsed
    pub fn init(&mut self, world_location: &str, matrix_location: Option<&str>) -> Result<&World> {
        let text = self
            .source
            .fetch(world_location)
            .map_err(|error| EngineError::WorldLoad {
                location: world_location.to_string(),
                reason: error.to_string(),
            })?;
        let world = parse_world(&text, world_location)?;
        let mainlands = MainlandTable::build(&world);

        let matrix = matrix_location.and_then(|location| {
            self.source
                .fetch(location)
                .and_then(|text| DistanceMatrix::from_json_str(&text, location))
                .inspect_err(|error| warn!(%error, "continuing without precomputed distances"))
                .ok()
        });

        info!(
            regions = world.len(),
            mainlands = mainlands.len(),
            matrix_entries = matrix.as_ref().map_or(0, DistanceMatrix::len),
            "engine data loaded"
        );

        let cache = DistanceCache::new(matrix.map(Arc::new))
            .with_unknown_distance(self.config.unknown_distance_km);
        let loaded = self.loaded.insert(LoadedData {
            world: Arc::new(world),
            mainlands: Arc::new(mainlands),
            cache,
        });
        Ok(loaded.world.as_ref())
    }

    /// Run the candidate filter against the loaded universe
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotLoaded`] before a successful INIT, or any
    /// error from [`CandidateFilter::apply`]
    pub fn filter(&mut self, clues: &[Clue], mode: TerritoryMode) -> Result<Vec<&Region>> {
        let loaded = self.loaded.as_mut().ok_or(EngineError::NotLoaded)?;
        let filter = CandidateFilter::new(&loaded.world, &loaded.mainlands, self.config.tolerance);
        let set = filter.apply(&mut loaded.cache, clues, mode)?;
        Ok(set.regions(&loaded.world))
    }
}
