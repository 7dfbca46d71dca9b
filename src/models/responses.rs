use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{BoundingBox, Coordinates, Criterion, PropertyScore, Rating, Tier};
use crate::services::geocoder::GeocodeError;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Outcome of resolving an address, in the shape clients expect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Coordinates, GeocodeError>> for GeocodeResult {
    fn from(result: Result<Coordinates, GeocodeError>) -> Self {
        match result {
            Ok(coords) => Self {
                latitude: coords.latitude,
                longitude: coords.longitude,
                success: true,
                error: None,
            },
            Err(e) => Self {
                latitude: 0.0,
                longitude: 0.0,
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// A rating that could not be written during a batch save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRating {
    pub criterion_id: Uuid,
    pub error: String,
}

/// Result of a best-effort batch rating save
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveRatingsResponse {
    pub saved: Vec<Rating>,
    pub failed: Vec<FailedRating>,
}

/// One row of the comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub rank: usize,
    pub tier: Tier,
    #[serde(flatten)]
    pub score: PropertyScore,
}

/// Ranked comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub view: String,
    pub sort: String,
    pub rows: Vec<ReportRow>,
    pub criteria: Vec<Criterion>,
    pub property_count: usize,
    pub tier1_count: usize,
    pub has_ratings: bool,
}

/// Distance from a property to one key location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDistance {
    pub location_id: Uuid,
    pub name: String,
    pub distance_km: f64,
    pub distance_miles: f64,
}

/// Distances from one property to every key location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistancesResponse {
    pub property_id: Uuid,
    pub distances: Vec<LocationDistance>,
}

/// A property pin on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
    pub property_id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    pub price: Option<f64>,
    pub coordinates: Coordinates,
}

/// Data needed to render the property map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    pub center: Coordinates,
    pub bounds: Option<BoundingBox>,
    pub markers: Vec<MapMarker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_result_from_success() {
        let result = GeocodeResult::from(Ok(Coordinates {
            latitude: 39.7392,
            longitude: -104.9903,
        }));
        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.latitude, 39.7392);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_geocode_result_from_failure() {
        let result = GeocodeResult::from(Err(GeocodeError::EmptyAddress));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Address is required"));
        assert_eq!(result.latitude, 0.0);
        assert_eq!(result.longitude, 0.0);
    }
}
