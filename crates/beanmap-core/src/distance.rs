//! Great-circle distance between coordinates.

use crate::cafe::{CafeRecord, Coordinates};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
///
/// Symmetric, and zero for identical points.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Recompute `distance_km` for every record against `reference`.
///
/// With no reference, every distance is cleared so nothing stale survives a
/// change of origin.
#[must_use]
pub fn apply_reference(cafes: Vec<CafeRecord>, reference: Option<Coordinates>) -> Vec<CafeRecord> {
    match reference {
        Some(origin) => cafes
            .into_iter()
            .map(|c| c.with_distance_from(origin))
            .collect(),
        None => cafes.into_iter().map(CafeRecord::without_distance).collect(),
    }
}
