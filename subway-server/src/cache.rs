//! Caching layer for MBTA route data.
//!
//! The full subway route list changes rarely but is needed on every
//! resolution, so it is held in a short-TTL cache. A route change inside
//! the TTL window is invisible to callers until expiry; there is no other
//! invalidation in the pipeline.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::mbta::{MbtaClient, MbtaError, RouteResource, StopResource};
use crate::resolver::TransitProvider;

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// How long a fetched route list stays valid.
    pub ttl: Duration,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// MBTA client with a TTL cache over the full route list.
///
/// Stop fetches and per-stop route detail pass straight through; only the
/// parameterless full-route fetch is cached. One shared instance serves
/// the whole process.
pub struct CachedMbtaClient {
    client: MbtaClient,
    routes: MokaCache<(), Arc<Vec<RouteResource>>>,
}

impl CachedMbtaClient {
    /// Create a new cached client.
    pub fn new(client: MbtaClient, config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { client, routes }
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &MbtaClient {
        &self.client
    }

    /// Drop the cached route list; the next fetch goes to the API.
    pub fn invalidate(&self) {
        self.routes.invalidate_all();
    }

    async fn routes_cached(&self) -> Result<Arc<Vec<RouteResource>>, MbtaError> {
        if let Some(cached) = self.routes.get(&()).await {
            return Ok(cached);
        }

        // Concurrent misses may both fetch; the later insert wins.
        let fresh = Arc::new(self.client.subway_routes().await?);
        self.routes.insert((), fresh.clone()).await;

        Ok(fresh)
    }
}

impl TransitProvider for CachedMbtaClient {
    async fn subway_routes(&self) -> Result<Arc<Vec<RouteResource>>, MbtaError> {
        self.routes_cached().await
    }

    async fn subway_stops(&self) -> Result<Vec<StopResource>, MbtaError> {
        self.client.subway_stops().await
    }

    async fn routes_serving_stop(&self, stop_id: &str) -> Result<Vec<RouteResource>, MbtaError> {
        self.client.routes_serving_stop(stop_id).await
    }
}
