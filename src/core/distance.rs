use crate::models::{BoundingBox, Coordinates, KeyLocation, LocationDistance};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

const MILES_PER_KM: f64 = 0.621_371;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `from` - First point, degrees
/// * `to` - Second point, degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[inline]
pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

/// Distance from a property to each key location, in location order
pub fn distances_from(origin: Coordinates, locations: &[KeyLocation]) -> Vec<LocationDistance> {
    locations
        .iter()
        .map(|location| {
            let distance_km = haversine_distance(origin, location.coordinates());
            LocationDistance {
                location_id: location.id,
                name: location.name.clone(),
                distance_km,
                distance_miles: km_to_miles(distance_km),
            }
        })
        .collect()
}

/// Average position of a set of points, used to center the map
///
/// Returns `None` for an empty set so the caller can fall back to its
/// configured default.
pub fn map_center(points: &[Coordinates]) -> Option<Coordinates> {
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let latitude = points.iter().map(|p| p.latitude).sum::<f64>() / count;
    let longitude = points.iter().map(|p| p.longitude).sum::<f64>() / count;

    Some(Coordinates { latitude, longitude })
}

/// Smallest box containing every point
pub fn marker_bounds(points: &[Coordinates]) -> Option<BoundingBox> {
    let first = points.first()?;

    let initial = BoundingBox {
        min_lat: first.latitude,
        max_lat: first.latitude,
        min_lon: first.longitude,
        max_lon: first.longitude,
    };

    Some(points.iter().fold(initial, |bbox, p| BoundingBox {
        min_lat: bbox.min_lat.min(p.latitude),
        max_lat: bbox.max_lat.max(p.latitude),
        min_lon: bbox.min_lon.min(p.longitude),
        max_lon: bbox.max_lon.max(p.longitude),
    }))
}
