// Service exports
pub mod cache;
pub mod geocoder;
pub mod nominatim;
pub mod postgres;
pub mod rate_limiter;

pub use cache::LayeredGeocodeCache;
pub use geocoder::{normalize_address, GeocodeCache, GeocodeError, GeocodeProvider, Geocoder};
pub use nominatim::NominatimClient;
pub use postgres::{PostgresClient, StoreError};
pub use rate_limiter::RateLimiter;
