use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::Coordinates;
use crate::services::postgres::StoreError;
use crate::services::rate_limiter::RateLimiter;

/// Errors that can occur while resolving an address
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Address is required")]
    EmptyAddress,

    #[error("Address not found. Please verify the address is correct.")]
    NotFound,

    #[error("Geocoding failed: {0}")]
    Status(u16),

    #[error("{0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// External service that turns a free-text address into coordinates
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Look up the top match for `address`; `Ok(None)` when nothing matched
    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// Persistent memo table of resolved addresses
///
/// Entries are written once and never updated or expired.
#[async_trait]
pub trait GeocodeCache: Send + Sync {
    async fn get(&self, address: &str) -> Result<Option<Coordinates>, StoreError>;

    /// Store `coordinates` unless the address already has an entry
    ///
    /// Returns the coordinates held for the address afterwards, which are the
    /// earlier entry's when one existed.
    async fn put(
        &self,
        address: &str,
        coordinates: Coordinates,
    ) -> Result<Coordinates, StoreError>;
}

/// Normalize an address into its cache key
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_address(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Resolves addresses through a cache, falling back to a rate-limited provider
pub struct Geocoder {
    cache: Arc<dyn GeocodeCache>,
    provider: Arc<dyn GeocodeProvider>,
    limiter: RateLimiter,
}

impl Geocoder {
    pub fn new(
        cache: Arc<dyn GeocodeCache>,
        provider: Arc<dyn GeocodeProvider>,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            cache,
            provider,
            limiter,
        }
    }

    /// Resolve an address to coordinates
    ///
    /// Cache hits return without waiting. Misses wait on the rate limiter,
    /// query the provider once and cache only successful matches. Failures
    /// are never retried.
    pub async fn resolve_address(&self, raw_address: &str) -> Result<Coordinates, GeocodeError> {
        let address = normalize_address(raw_address).ok_or(GeocodeError::EmptyAddress)?;

        match self.cache.get(&address).await {
            Ok(Some(coordinates)) => {
                tracing::trace!("Geocode cache hit: {}", address);
                return Ok(coordinates);
            }
            Ok(None) => {
                tracing::debug!("Geocode cache miss: {}", address);
            }
            Err(e) => {
                tracing::warn!(
                    "Geocode cache read failed for {}, treating as miss: {}",
                    address,
                    e
                );
            }
        }

        self.limiter.acquire().await;

        let coordinates = match self.provider.lookup(&address).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => {
                tracing::info!("No geocoding match for {}", address);
                return Err(GeocodeError::NotFound);
            }
            Err(e) => {
                tracing::error!("Geocoding request failed for {}: {}", address, e);
                return Err(e);
            }
        };

        match self.cache.put(&address, coordinates).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                tracing::warn!("Failed to cache geocode result for {}: {}", address, e);
                Ok(coordinates)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("  123 Main St, Denver, CO  ").as_deref(),
            Some("123 main st, denver, co")
        );
        assert_eq!(
            normalize_address("123 main st, denver, co").as_deref(),
            Some("123 main st, denver, co")
        );
        assert_eq!(normalize_address(""), None);
        assert_eq!(normalize_address(" \t\n "), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GeocodeError::EmptyAddress.to_string(), "Address is required");
        assert_eq!(
            GeocodeError::NotFound.to_string(),
            "Address not found. Please verify the address is correct."
        );
        assert_eq!(GeocodeError::Status(503).to_string(), "Geocoding failed: 503");
    }
}
