//! GeoJSON feature collections in and out of the region model
//!
//! Only `Polygon` and `MultiPolygon` features become regions. Features with
//! other geometry types, no geometry, no polygon of positive area, or no
//! usable identity are skipped with a warning; malformed JSON fails the whole
//! load.

use crate::io::configuration::{ID_PROPERTY_KEYS, MISSING_CODE_PLACEHOLDER, NAME_PROPERTY_KEYS};
use crate::io::error::{EngineError, Result};
use crate::spatial::mainland::mainland;
use crate::spatial::region::{Region, RegionId, World};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

type RawRing = Vec<Vec<f64>>;

/// Identity of a feature: its stable id and display name
///
/// The id is the feature `id`, then the first code property, then the
/// display name. Natural Earth's `-99` placeholder counts as missing.
pub fn feature_identity(
    feature_id: Option<&Value>,
    properties: &Map<String, Value>,
) -> Option<(RegionId, Option<String>)> {
    let usable = |value: &Value| -> Option<String> {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty() && text != MISSING_CODE_PLACEHOLDER).then_some(text)
    };

    let name = NAME_PROPERTY_KEYS
        .iter()
        .find_map(|key| properties.get(*key).and_then(usable));

    let code = feature_id.and_then(usable).or_else(|| {
        ID_PROPERTY_KEYS
            .iter()
            .find_map(|key| properties.get(*key).and_then(usable))
    });

    code.or_else(|| name.clone())
        .map(|id| (RegionId::new(id), name))
}

fn ring_from_raw(ring: RawRing) -> std::result::Result<LineString<f64>, String> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
            _ => Err(format!("invalid position {position:?}")),
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn polygon_from_raw(rings: Vec<RawRing>) -> std::result::Result<Option<Polygon<f64>>, String> {
    let mut rings = rings.into_iter().map(ring_from_raw);
    let Some(exterior) = rings.next().transpose()? else {
        return Ok(None);
    };
    if exterior.0.is_empty() {
        return Ok(None);
    }
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Some(Polygon::new(exterior, interiors)))
}

fn geometry_from_raw(raw: RawGeometry) -> std::result::Result<MultiPolygon<f64>, String> {
    let polygons = match raw.kind.as_str() {
        "Polygon" => {
            let rings: Vec<RawRing> =
                serde_json::from_value(raw.coordinates).map_err(|e| e.to_string())?;
            vec![rings]
        }
        "MultiPolygon" => serde_json::from_value(raw.coordinates).map_err(|e| e.to_string())?,
        other => return Err(format!("unsupported geometry type '{other}'")),
    };

    let mut members = Vec::with_capacity(polygons.len());
    for rings in polygons {
        if let Some(polygon) = polygon_from_raw(rings)? {
            members.push(polygon);
        }
    }
    Ok(MultiPolygon::new(members))
}

fn region_from_raw(feature: RawFeature, position: usize) -> Option<Region> {
    let properties = feature.properties.unwrap_or_default();
    let Some((id, name)) = feature_identity(feature.id.as_ref(), &properties) else {
        warn!(position, "skipping feature without identifier or name");
        return None;
    };
    let Some(raw_geometry) = feature.geometry else {
        warn!(region = %id, "skipping feature without geometry");
        return None;
    };

    match geometry_from_raw(raw_geometry) {
        Ok(geometry) => {
            if let Err(error) = mainland(&id, &geometry) {
                warn!(region = %id, %error, "skipping feature without a usable mainland");
                return None;
            }
            let region = Region::new(id, geometry).with_properties(properties);
            Some(match name {
                Some(name) => region.with_name(name),
                None => region,
            })
        }
        Err(reason) => {
            warn!(region = %id, %reason, "skipping feature with unusable geometry");
            None
        }
    }
}

/// Parse a GeoJSON feature collection into a world
///
/// # Errors
///
/// Returns [`EngineError::WorldLoad`] if the text is not a feature collection
pub fn parse_world(text: &str, location: &str) -> Result<World> {
    let collection: RawCollection =
        serde_json::from_str(text).map_err(|e| EngineError::WorldLoad {
            location: location.to_string(),
            reason: e.to_string(),
        })?;

    let total = collection.features.len();
    let world = World::new(
        collection
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(position, feature)| region_from_raw(feature, position)),
    );
    debug!(location, total, loaded = world.len(), "parsed feature collection");
    Ok(world)
}

/// GeoJSON geometry emitted for a region
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum FeatureGeometry {
    /// Single-part region
    Polygon(Vec<Vec<[f64; 2]>>),
    /// Multi-part region
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

/// GeoJSON feature emitted for a region in engine responses
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Resolved region identifier
    pub id: RegionId,
    /// Source attributes
    pub properties: Map<String, Value>,
    /// Full region geometry
    pub geometry: FeatureGeometry,
}

fn rings_to_positions(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
        .collect()
}

impl RegionFeature {
    /// Serialize a region back into a feature
    pub fn from_region(region: &Region) -> Self {
        let polygons = &region.geometry().0;
        let geometry = match polygons.as_slice() {
            [single] => FeatureGeometry::Polygon(rings_to_positions(single)),
            many => FeatureGeometry::MultiPolygon(many.iter().map(rings_to_positions).collect()),
        };
        Self {
            kind: "Feature",
            id: region.id().clone(),
            properties: region.properties().clone(),
            geometry,
        }
    }
}
