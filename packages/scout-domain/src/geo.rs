use crate::card::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points, via the
/// haversine formula.
///
/// Callers must filter non-finite coordinates before calling; this
/// function does no validation.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
	let d_lat = (b.lat - a.lat).to_radians();
	let d_lng = (b.lng - a.lng).to_radians();
	let h = (d_lat / 2.0).sin().powi(2)
		+ a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
	// Floating error can push h a hair past 1; clamp before asin.
	2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
