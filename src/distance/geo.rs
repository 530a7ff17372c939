//! Great-circle geometry.

use crate::models::Location;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two locations (haversine formula), in km.
///
/// # Examples
///
/// ```
/// use u_routeplan::distance::haversine_km;
/// use u_routeplan::models::Location;
///
/// let a = Location::new("a", 0.0, 0.0, "A");
/// let b = Location::new("b", 0.0, 1.0, "B");
/// // One degree of longitude on the equator
/// assert!((haversine_km(&a, &b) - 111.195).abs() < 1e-2);
/// ```
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
