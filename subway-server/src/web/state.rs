//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedMbtaClient;
use crate::resolver::ResolverConfig;

/// Shared application state.
///
/// Contains the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached MBTA API client
    pub mbta: Arc<CachedMbtaClient>,

    /// Station resolver configuration
    pub config: Arc<ResolverConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(mbta: CachedMbtaClient, config: ResolverConfig) -> Self {
        Self {
            mbta: Arc::new(mbta),
            config: Arc::new(config),
        }
    }
}
