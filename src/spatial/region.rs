use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Stable short identifier of a region (a country code, or its name when no code exists)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A geographic unit with one or more polygon parts
///
/// Regions are immutable once loaded. Derived geometry such as the mainland
/// lives in side tables keyed by [`RegionId`].
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    id: RegionId,
    name: Option<String>,
    properties: Map<String, Value>,
    geometry: MultiPolygon<f64>,
}

impl Region {
    /// Create a region without a display name or extra properties
    pub fn new(id: RegionId, geometry: MultiPolygon<f64>) -> Self {
        Self {
            id,
            name: None,
            properties: Map::new(),
            geometry,
        }
    }

    /// Attach a display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the non-geometric attributes carried by the source feature
    #[must_use]
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Copy of this region with replaced geometry and identical attributes
    #[must_use]
    pub fn with_geometry(&self, geometry: MultiPolygon<f64>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            properties: self.properties.clone(),
            geometry,
        }
    }

    /// Stable identifier
    pub const fn id(&self) -> &RegionId {
        &self.id
    }

    /// Display name, if the source carried one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Source feature attributes
    pub const fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Full geometry including outlying territories
    pub const fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}

/// The loaded region universe with an identifier index
///
/// Region order is input order and is stable for the lifetime of the world,
/// so positions can be used as compact indices.
#[derive(Clone, Debug, Default)]
pub struct World {
    regions: Vec<Region>,
    index: HashMap<RegionId, usize>,
}

impl World {
    /// Build a world, keeping the first region for any repeated identifier
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        let mut world = Self::default();
        for region in regions {
            if world.index.contains_key(region.id()) {
                warn!(region = %region.id(), "duplicate region identifier, keeping first occurrence");
                continue;
            }
            world.index.insert(region.id().clone(), world.regions.len());
            world.regions.push(region);
        }
        world
    }

    /// Number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Test if the universe is empty
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate regions in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Look up a region by identifier
    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.position(id).and_then(|index| self.regions.get(index))
    }

    /// Position of a region in input order
    pub fn position(&self, id: &RegionId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Region at a position
    pub fn region_at(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Apply a geometry transformation to every region, keeping identities and order
    #[must_use]
    pub fn map_geometries<F>(&self, mut transform: F) -> Self
    where
        F: FnMut(&MultiPolygon<f64>) -> MultiPolygon<f64>,
    {
        Self {
            regions: self
                .regions
                .iter()
                .map(|region| region.with_geometry(transform(region.geometry())))
                .collect(),
            index: self.index.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a World {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
