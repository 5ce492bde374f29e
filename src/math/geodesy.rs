//! Great-circle primitives on a spherical Earth
//!
//! Coordinates follow the GeoJSON convention: `x` is longitude and `y` is
//! latitude, both in degrees. All distances are in kilometers.

use geo::Coord;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// Central angle between two coordinates in radians (haversine formula)
pub fn central_angle(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * h.sqrt().min(1.0).asin()
}

/// Great-circle distance between two coordinates
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_KM
}

/// Initial bearing from `a` towards `b` in radians, clockwise from north
pub fn initial_bearing(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let y = d_lon.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lon.cos();

    y.atan2(x)
}

/// Shortest great-circle distance from `point` to the arc `start`-`end`
///
/// The perpendicular (cross-track) distance is used when the foot of the
/// perpendicular lies on the arc; otherwise the nearer endpoint wins.
/// A zero-length arc degenerates to the point-to-point distance.
///
/// Returns `None` when any input or the result is not finite, so callers can
/// drop the sample instead of poisoning a minimum.
pub fn point_to_segment_km(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> Option<f64> {
    let finite = |c: Coord<f64>| c.x.is_finite() && c.y.is_finite();
    if !(finite(point) && finite(start) && finite(end)) {
        return None;
    }

    let to_start = central_angle(start, point);
    let to_end = central_angle(end, point);
    let arc_length = central_angle(start, end);

    let distance = if arc_length <= f64::EPSILON || to_start <= f64::EPSILON {
        to_start
    } else {
        let relative_bearing = initial_bearing(start, point) - initial_bearing(start, end);
        let cross_track = (to_start.sin() * relative_bearing.sin()).clamp(-1.0, 1.0).asin();
        // Signed, so a foot behind the start or past the antipode stays distinguishable
        let along_track = (to_start.sin() * relative_bearing.cos()).atan2(to_start.cos());

        if (0.0..=arc_length).contains(&along_track) {
            cross_track.abs()
        } else {
            to_start.min(to_end)
        }
    };

    let km = distance * EARTH_RADIUS_KM;
    km.is_finite().then_some(km)
}

/// Round a kilometer value to one decimal place
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
