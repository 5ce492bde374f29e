use crate::spatial::region::World;
use geo::{LineString, MultiPolygon, Polygon, Simplify};

/// Smallest coordinate count of a closed ring that still encloses an area
const MIN_RING_COORDS: usize = 4;

/// Douglas-Peucker simplify a ring, keeping the original when it would collapse
fn simplify_ring(ring: &LineString<f64>, tolerance: f64) -> LineString<f64> {
    let simplified = ring.simplify(&tolerance);
    if simplified.0.len() < MIN_RING_COORDS {
        ring.clone()
    } else {
        simplified
    }
}

/// Simplify every ring of a geometry with a tolerance in degrees
///
/// Rings that would degenerate below a valid closed ring are kept as-is, so
/// every input polygon survives with its holes.
pub fn simplify_geometry(geometry: &MultiPolygon<f64>, tolerance: f64) -> MultiPolygon<f64> {
    if tolerance <= 0.0 {
        return geometry.clone();
    }

    geometry
        .iter()
        .map(|polygon| {
            Polygon::new(
                simplify_ring(polygon.exterior(), tolerance),
                polygon
                    .interiors()
                    .iter()
                    .map(|ring| simplify_ring(ring, tolerance))
                    .collect(),
            )
        })
        .collect()
}

/// Simplified copy of a whole world
pub fn simplify_world(world: &World, tolerance: f64) -> World {
    world.map_geometries(|geometry| simplify_geometry(geometry, tolerance))
}
