use std::net::SocketAddr;

use subway_server::cache::{CachedMbtaClient, RouteCacheConfig};
use subway_server::mbta::{MbtaClient, MbtaConfig};
use subway_server::resolver::ResolverConfig;
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("subway_server=info")),
        )
        .init();

    // An API key is optional; anonymous access gets a tighter rate limit.
    let mut mbta_config = MbtaConfig::new();
    match std::env::var("MBTA_API_KEY") {
        Ok(key) if !key.is_empty() => mbta_config = mbta_config.with_api_key(key),
        _ => eprintln!("Warning: MBTA_API_KEY not set. Requests run anonymously."),
    }
    if let Ok(base_url) = std::env::var("MBTA_BASE_URL") {
        mbta_config = mbta_config.with_base_url(base_url);
    }

    let client = MbtaClient::new(mbta_config).expect("Failed to create MBTA client");
    let cached = CachedMbtaClient::new(client, &RouteCacheConfig::default());

    // Build app state
    let state = AppState::new(cached, ResolverConfig::default());

    // Create router
    let app = create_router(state, "static");

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Nearby Subway listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the map.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health               - Health check");
    println!("  GET  /api/stations/nearby  - Nearest stations for a coordinate");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
