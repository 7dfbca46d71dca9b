// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Coordinates, Criterion, CriterionType, GeocodeCacheEntry, InvalidRatingScore,
    KeyLocation, Property, PropertyScore, Rating, RatingScore, Tier,
};
pub use requests::{
    ArchiveRequest, CriterionDraft, GeocodeRequest, LocationDraft, PropertyDraft,
    PropertyListQuery, RatingInput, ReportQuery, SaveRatingsRequest,
};
pub use responses::{
    DistancesResponse, ErrorResponse, FailedRating, GeocodeResult, HealthResponse,
    LocationDistance, MapMarker, MapResponse, ReportResponse, ReportRow, SaveRatingsResponse,
};
