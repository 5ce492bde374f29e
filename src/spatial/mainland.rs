use crate::io::error::{Result, invalid_geometry};
use crate::spatial::region::{Region, RegionId, World};
use geo::{ChamberlainDuquetteArea, MultiPolygon, Polygon};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Which geometry a distance query measures against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerritoryMode {
    /// Only the largest polygon of each region
    #[default]
    MainlandOnly,
    /// Every polygon of each region, outlying territories included
    IncludeTerritories,
}

impl TerritoryMode {
    /// Test if outlying territories take part in distance queries
    pub const fn includes_territories(self) -> bool {
        matches!(self, Self::IncludeTerritories)
    }
}

impl From<bool> for TerritoryMode {
    fn from(include_territories: bool) -> Self {
        if include_territories {
            Self::IncludeTerritories
        } else {
            Self::MainlandOnly
        }
    }
}

/// Select the largest-area member polygon of a geometry
///
/// Areas are spherical (Chamberlain-Duquette). Ties resolve to the first
/// polygon in input order.
///
/// # Errors
///
/// Returns [`InvalidGeometry`](crate::EngineError::InvalidGeometry) when the
/// geometry has no member polygons or no member with positive area.
pub fn mainland(id: &RegionId, geometry: &MultiPolygon<f64>) -> Result<Polygon<f64>> {
    if geometry.0.is_empty() {
        return Err(invalid_geometry(id, &"geometry has no polygons"));
    }

    let mut largest: Option<(&Polygon<f64>, f64)> = None;
    for polygon in &geometry.0 {
        let area = polygon.chamberlain_duquette_unsigned_area();
        if area > largest.map_or(0.0, |(_, best)| best) {
            largest = Some((polygon, area));
        }
    }

    largest
        .map(|(polygon, _)| polygon.clone())
        .ok_or_else(|| invalid_geometry(id, &"no polygon encloses a positive area"))
}

/// Side table of mainland geometries, built once per loaded world
///
/// Regions whose mainland cannot be derived are left out and fall back to
/// their full geometry.
#[derive(Clone, Debug, Default)]
pub struct MainlandTable {
    by_region: HashMap<RegionId, MultiPolygon<f64>>,
}

impl MainlandTable {
    /// Derive the mainland of every region, skipping and logging invalid ones
    pub fn build(world: &World) -> Self {
        let mut by_region = HashMap::with_capacity(world.len());

        for region in world {
            match mainland(region.id(), region.geometry()) {
                Ok(polygon) => {
                    let dropped = region.geometry().0.len().saturating_sub(1);
                    if dropped > 0 {
                        debug!(region = %region.id(), dropped, "mainland excludes outlying polygons");
                    }
                    by_region.insert(region.id().clone(), MultiPolygon::new(vec![polygon]));
                }
                Err(error) => warn!(region = %region.id(), %error, "skipping mainland derivation"),
            }
        }

        Self { by_region }
    }

    /// Geometry a distance query should use for a region under the given mode
    pub fn geometry_for<'a>(&'a self, region: &'a Region, mode: TerritoryMode) -> &'a MultiPolygon<f64> {
        match mode {
            TerritoryMode::IncludeTerritories => region.geometry(),
            TerritoryMode::MainlandOnly => self
                .by_region
                .get(region.id())
                .unwrap_or_else(|| region.geometry()),
        }
    }

    /// Number of derived mainlands
    pub fn len(&self) -> usize {
        self.by_region.len()
    }

    /// Test if no mainland was derived
    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty()
    }
}
