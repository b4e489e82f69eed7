//! Resolver configuration.

use std::time::Duration;

/// Configuration parameters for station resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of stations returned. Only these get per-stop line
    /// data; the cap and the radius are a deliberate cost-control pairing.
    pub max_stations: usize,

    /// Spacing between consecutive per-stop route detail fetches.
    pub detail_delay: Duration,

    /// Decimal places used when rounding coordinates for stop grouping.
    pub coordinate_decimals: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_stations: 3,
            detail_delay: Duration::from_millis(500),
            coordinate_decimals: 6,
        }
    }
}
