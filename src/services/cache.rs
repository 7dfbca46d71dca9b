use async_trait::async_trait;
use std::sync::Arc;

use crate::models::Coordinates;
use crate::services::geocoder::GeocodeCache;
use crate::services::postgres::StoreError;

/// Two-tier geocode cache
///
/// L1 is a bounded in-process moka cache, L2 is the persistent store.
/// Entries never change once written, so L1 has no TTL and only evicts by
/// size.
pub struct LayeredGeocodeCache {
    persistent: Arc<dyn GeocodeCache>,
    l1_cache: moka::future::Cache<String, Coordinates>,
}

impl LayeredGeocodeCache {
    /// Create a new layered cache in front of `persistent`
    pub fn new(persistent: Arc<dyn GeocodeCache>, l1_size: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size).build();

        Self {
            persistent,
            l1_cache,
        }
    }
}

#[async_trait]
impl GeocodeCache for LayeredGeocodeCache {
    async fn get(&self, address: &str) -> Result<Option<Coordinates>, StoreError> {
        if let Some(coordinates) = self.l1_cache.get(address).await {
            tracing::trace!("L1 geocode cache hit: {}", address);
            return Ok(Some(coordinates));
        }

        let stored = self.persistent.get(address).await?;

        if let Some(coordinates) = stored {
            tracing::trace!("L2 geocode cache hit: {}", address);
            self.l1_cache.insert(address.to_string(), coordinates).await;
        }

        Ok(stored)
    }

    async fn put(
        &self,
        address: &str,
        coordinates: Coordinates,
    ) -> Result<Coordinates, StoreError> {
        // L1 mirrors whatever the persistent tier kept, not the candidate
        let stored = self.persistent.put(address, coordinates).await?;
        self.l1_cache.insert(address.to_string(), stored).await;

        tracing::trace!("Geocode cache set: {}", address);
        Ok(stored)
    }
}
