//! Great-circle distance used for proximity validation.

use geo::Coord;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in metres between two WGS84 coordinates.
///
/// Coordinates follow the crate convention of `x = longitude`,
/// `y = latitude`, in decimal degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopsync_core::haversine_meters;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(haversine_meters(origin, origin), 0.0);
/// ```
pub fn haversine_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
