use crate::math::geodesy::point_to_segment_km;
use geo::{Coord, Intersects, Line, LineString, MultiPolygon};

/// Boundary decomposition of a geometry into vertices and edges
///
/// Every ring contributes, holes included. Vertices skip the duplicated
/// closing coordinate of each ring.
#[derive(Clone, Debug, Default)]
pub struct Boundary {
    vertices: Vec<Coord<f64>>,
    segments: Vec<Line<f64>>,
}

impl Boundary {
    /// Decompose every ring of a geometry
    pub fn from_geometry(geometry: &MultiPolygon<f64>) -> Self {
        let mut boundary = Self::default();
        for polygon in geometry {
            boundary.push_ring(polygon.exterior());
            for ring in polygon.interiors() {
                boundary.push_ring(ring);
            }
        }
        boundary
    }

    fn push_ring(&mut self, ring: &LineString<f64>) {
        let closed = ring.is_closed() && ring.0.len() > 1;
        let open_len = if closed { ring.0.len() - 1 } else { ring.0.len() };
        self.vertices.extend(ring.0.iter().take(open_len).copied());
        self.segments.extend(ring.lines());
    }

    /// Ring vertices
    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    /// Ring edges
    pub fn segments(&self) -> &[Line<f64>] {
        &self.segments
    }
}

/// Minimum distance from any vertex to any segment
///
/// Samples whose computation fails are left out of the minimum. Returns
/// `None` when no sample succeeded.
pub fn directional_min_km(vertices: &[Coord<f64>], segments: &[Line<f64>]) -> Option<f64> {
    let mut best: Option<f64> = None;

    for &vertex in vertices {
        for segment in segments {
            let Some(km) = point_to_segment_km(vertex, segment.start, segment.end) else {
                continue;
            };
            if best.is_none_or(|current| km < current) {
                best = Some(km);
                if km <= 0.0 {
                    return best;
                }
            }
        }
    }

    best
}

/// Minimum geodesic distance between two geometries in kilometers
///
/// Intersecting or touching geometries are exactly 0. Otherwise the vertices
/// of each side are measured against the edges of the other and the smaller
/// of both passes wins; the reverse pass is skipped once the forward pass
/// already reached 0. Returns `None` when every sample failed.
pub fn pairwise_distance_km(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> Option<f64> {
    if a.intersects(b) {
        return Some(0.0);
    }

    let boundary_a = Boundary::from_geometry(a);
    let boundary_b = Boundary::from_geometry(b);

    let forward = directional_min_km(boundary_a.vertices(), boundary_b.segments());
    if forward == Some(0.0) {
        return forward;
    }

    let reverse = directional_min_km(boundary_b.vertices(), boundary_a.segments());
    match (forward, reverse) {
        (Some(f), Some(r)) => Some(f.min(r)),
        (one, None) | (None, one) => one,
    }
}
