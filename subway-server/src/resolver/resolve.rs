//! Station resolution pipeline.
//!
//! Turns the raw stop and route lists into a deduplicated,
//! distance-filtered, line-annotated list of nearby stations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::classify::{classify, line_lookup};
use crate::domain::{Coordinate, Line, Station};
use crate::mbta::{MbtaError, RouteResource, StopResource};

use super::config::ResolverConfig;
use super::group::{StationGroup, merge_by_name, nearby_groups};

/// Error from station resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// An unrecoverable fetch failure during stop or route retrieval.
    #[error("failed to fetch {what}: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: MbtaError,
    },
}

/// Trait for providing transit data.
///
/// This abstraction allows the resolver to be tested with mock data.
/// The production implementation is `CachedMbtaClient`.
#[allow(async_fn_in_trait)]
pub trait TransitProvider {
    /// The full subway route list (light and heavy rail).
    async fn subway_routes(&self) -> Result<Arc<Vec<RouteResource>>, MbtaError>;

    /// Every stop served by a subway route.
    async fn subway_stops(&self) -> Result<Vec<StopResource>, MbtaError>;

    /// The subway routes serving a single stop.
    async fn routes_serving_stop(&self, stop_id: &str) -> Result<Vec<RouteResource>, MbtaError>;
}

/// Resolves the nearest stations around a coordinate.
pub struct StationResolver<'a, P: TransitProvider> {
    provider: &'a P,
    config: &'a ResolverConfig,
}

impl<'a, P: TransitProvider> StationResolver<'a, P> {
    /// Create a new resolver.
    pub fn new(provider: &'a P, config: &'a ResolverConfig) -> Self {
        Self { provider, config }
    }

    /// Resolve the nearest stations within `radius_miles` of `origin`.
    ///
    /// Returns at most `max_stations` stations in ascending distance order
    /// (the final name merge never re-sorts). A top-level fetch failure
    /// aborts the resolution; a failed per-stop detail fetch only costs
    /// that stop its lines.
    pub async fn resolve(
        &self,
        origin: Coordinate,
        radius_miles: f64,
    ) -> Result<Vec<Station>, ResolveError> {
        let routes_fut = async {
            self.provider
                .subway_routes()
                .await
                .map_err(|e| ResolveError::Fetch {
                    what: "routes",
                    source: e,
                })
        };
        let stops_fut = async {
            self.provider
                .subway_stops()
                .await
                .map_err(|e| ResolveError::Fetch {
                    what: "stops",
                    source: e,
                })
        };
        let (routes, stops) = futures::future::try_join(routes_fut, stops_fut).await?;

        let lookup = line_lookup(&routes);
        tracing::debug!(
            routes = routes.len(),
            classified = lookup.len(),
            stops = stops.len(),
            "fetched resolution inputs"
        );

        let mut groups = nearby_groups(stops, &origin, radius_miles, self.config.coordinate_decimals);
        groups.truncate(self.config.max_stations);

        let mut stations = Vec::with_capacity(groups.len());
        let mut first_fetch = true;
        for group in &groups {
            let lines = self.group_lines(group, &lookup, &mut first_fetch).await;
            stations.push(build_station(group, lines));
        }

        Ok(merge_by_name(stations))
    }

    /// Fetch and classify route detail for every platform in a group.
    ///
    /// Calls run strictly sequentially with `detail_delay` spacing to stay
    /// under the upstream rate limit. Routes are deduplicated by route id;
    /// a failed per-stop fetch contributes no routes.
    async fn group_lines(
        &self,
        group: &StationGroup,
        lookup: &HashMap<String, Line>,
        first_fetch: &mut bool,
    ) -> Vec<Line> {
        let mut by_route: HashMap<String, Line> = HashMap::new();

        for stop in &group.stops {
            if !*first_fetch && !self.config.detail_delay.is_zero() {
                tokio::time::sleep(self.config.detail_delay).await;
            }
            *first_fetch = false;

            match self.provider.routes_serving_stop(&stop.id).await {
                Ok(routes) => {
                    for route in routes {
                        let line = lookup.get(&route.id).copied().or_else(|| classify(&route));
                        if let Some(line) = line {
                            by_route.entry(route.id.clone()).or_insert(line);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        stop = %stop.id,
                        error = %e,
                        "route detail fetch failed, treating stop as unserved"
                    );
                }
            }
        }

        let mut lines: Vec<Line> = Vec::new();
        for line in by_route.values() {
            if !lines.contains(line) {
                lines.push(*line);
            }
        }
        lines.sort();
        lines
    }
}

fn build_station(group: &StationGroup, lines: Vec<Line>) -> Station {
    Station {
        id: group
            .stops
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_default(),
        name: group.name.clone(),
        coordinate: group.coordinate,
        distance_miles: group.distance_miles,
        wheelchair_accessible: group.wheelchair_accessible(),
        lines,
        // Only capped groups reach this point, so the flag is always set
        // here; it exists so a consumer never has to infer it from position.
        has_route_data: true,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mbta::MockTransit;

    fn origin() -> Coordinate {
        Coordinate::new(42.3601, -71.0589).unwrap()
    }

    fn test_config() -> ResolverConfig {
        ResolverConfig {
            detail_delay: Duration::ZERO,
            ..ResolverConfig::default()
        }
    }

    fn subway_routes() -> Vec<RouteResource> {
        vec![
            RouteResource::new("Red", "Red Line"),
            RouteResource::new("Green-B", "Green Line B"),
            RouteResource::new("Green-C", "Green Line C"),
            RouteResource::new("Orange", "Orange Line"),
        ]
    }

    #[tokio::test]
    async fn resolves_ranked_stations_within_radius() {
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![
                StopResource::new("dtx", "Downtown Crossing", 42.3555, -71.0603, 1),
                StopResource::new("pks", "Park Street", 42.3564, -71.0624, 0),
                StopResource::new("gov", "Government Center", 42.3597, -71.0592, 0),
                // ~5 miles out, beyond the radius
                StopResource::new("ale", "Alewife", 42.3954, -71.1426, 1),
            ])
            .with_stop_routes("gov", vec![RouteResource::new("Green-C", "Green Line C")])
            .with_stop_routes("pks", vec![RouteResource::new("Red", "Red Line")])
            .with_stop_routes("dtx", vec![RouteResource::new("Orange", "Orange Line")]);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 1.25).await.unwrap();

        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].name, "Government Center");
        assert!(stations.iter().all(|s| s.distance_miles <= 1.25));
        assert!(stations.windows(2).all(|w| {
            w[0].distance_miles <= w[1].distance_miles
        }));
        assert!(stations.iter().all(|s| s.has_route_data));
        assert_eq!(stations[0].lines, vec![Line::GreenC]);
    }

    #[tokio::test]
    async fn caps_results_and_skips_detail_for_the_rest() {
        // Five stations in range; only the closest three get detail fetches.
        let stops: Vec<StopResource> = (0..5)
            .map(|i| {
                StopResource::new(
                    format!("s{i}"),
                    format!("Station {i}"),
                    42.3601 + 0.001 * (i + 1) as f64,
                    -71.0589,
                    0,
                )
            })
            .collect();

        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(stops);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 5.0).await.unwrap();

        assert_eq!(stations.len(), 3);
        assert_eq!(
            provider.detail_fetches(),
            vec!["s0".to_string(), "s1".to_string(), "s2".to_string()]
        );
    }

    #[tokio::test]
    async fn merges_co_located_platforms_and_ors_accessibility() {
        // Two Park Street platform stops share the name/coordinate key but
        // have different ids and wheelchair flags.
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![
                StopResource::new("70076", "Park Street", 42.35111, -71.0589, 1),
                StopResource::new("70077", "Park Street", 42.35111, -71.0589, 0),
            ])
            .with_stop_routes("70076", vec![RouteResource::new("Red", "Red Line")])
            .with_stop_routes("70077", vec![RouteResource::new("Green-B", "Green Line B")]);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 1.25).await.unwrap();

        assert_eq!(stations.len(), 1);
        let park = &stations[0];
        assert_eq!(park.id, "70076");
        assert_eq!(park.name, "Park Street");
        assert!(park.wheelchair_accessible);
        assert_eq!(park.lines, vec![Line::Red, Line::GreenB]);
        // The platforms sit ~1 km south of the query point
        assert!((park.distance_miles - 0.62).abs() < 0.01, "got {}", park.distance_miles);
    }

    #[tokio::test]
    async fn merges_same_name_groups_at_different_coordinates() {
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![
                StopResource::new("a", "Park Street", 42.3564, -71.0624, 0),
                StopResource::new("b", "park street ", 42.3555, -71.0603, 1),
            ])
            .with_stop_routes("a", vec![RouteResource::new("Red", "Red Line")])
            .with_stop_routes("b", vec![RouteResource::new("Green-B", "Green Line B")]);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 1.25).await.unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].lines, vec![Line::Red, Line::GreenB]);
        assert!(stations[0].wheelchair_accessible);
    }

    #[tokio::test]
    async fn per_stop_failure_degrades_to_no_lines() {
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![
                StopResource::new("70076", "Park Street", 42.3554, -71.0640, 1),
                StopResource::new("70077", "Park Street", 42.3554, -71.0640, 0),
            ])
            .with_stop_routes("70076", vec![RouteResource::new("Red", "Red Line")])
            .failing_detail_for("70077");

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 1.25).await.unwrap();

        // The failing platform costs nothing but its own routes
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].lines, vec![Line::Red]);
    }

    #[tokio::test]
    async fn detail_routes_deduplicate_by_route_id() {
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![
                StopResource::new("x1", "Park Street", 42.3554, -71.0640, 0),
                StopResource::new("x2", "Park Street", 42.3554, -71.0640, 0),
            ])
            .with_stop_routes("x1", vec![RouteResource::new("Red", "Red Line")])
            .with_stop_routes("x2", vec![RouteResource::new("Red", "Red Line")]);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 1.25).await.unwrap();

        assert_eq!(stations[0].lines, vec![Line::Red]);
    }

    #[tokio::test]
    async fn detail_route_missing_from_lookup_is_still_classified() {
        // The per-stop response names a route the full route list didn't
        // carry; direct classification covers it.
        let provider = MockTransit::new()
            .with_routes(vec![RouteResource::new("Red", "Red Line")])
            .with_stops(vec![StopResource::new(
                "m", "Milton", 42.3554, -71.0640, 0,
            )])
            .with_stop_routes("m", vec![RouteResource::new("Mattapan", "Mattapan Trolley")]);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 1.25).await.unwrap();

        assert_eq!(stations[0].lines, vec![Line::Mattapan]);
    }

    #[tokio::test]
    async fn stop_fetch_failure_aborts_resolution() {
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .failing_stops();

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let result = resolver.resolve(origin(), 1.25).await;

        assert!(matches!(
            result,
            Err(ResolveError::Fetch { what: "stops", .. })
        ));
    }

    #[tokio::test]
    async fn route_fetch_failure_aborts_resolution() {
        let provider = MockTransit::new()
            .with_stops(vec![StopResource::new(
                "a", "Park Street", 42.3554, -71.0640, 0,
            )])
            .failing_routes();

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let result = resolver.resolve(origin(), 1.25).await;

        assert!(matches!(
            result,
            Err(ResolveError::Fetch { what: "routes", .. })
        ));
    }

    #[tokio::test]
    async fn empty_radius_yields_empty_list() {
        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![StopResource::new(
                "a", "Park Street", 42.3554, -71.0640, 0,
            )]);

        let config = test_config();
        let resolver = StationResolver::new(&provider, &config);
        let stations = resolver.resolve(origin(), 0.1).await.unwrap();

        assert!(stations.is_empty());
        assert!(provider.detail_fetches().is_empty());
    }

    #[tokio::test]
    async fn detail_fetches_are_spaced() {
        use std::time::Instant;

        let provider = MockTransit::new()
            .with_routes(subway_routes())
            .with_stops(vec![
                StopResource::new("a", "Park Street", 42.3554, -71.0640, 0),
                StopResource::new("b", "Park Street", 42.3554, -71.0640, 0),
                StopResource::new("c", "Park Street", 42.3554, -71.0640, 0),
            ]);

        let config = ResolverConfig {
            detail_delay: Duration::from_millis(20),
            ..ResolverConfig::default()
        };
        let resolver = StationResolver::new(&provider, &config);

        let start = Instant::now();
        resolver.resolve(origin(), 1.25).await.unwrap();

        // Three calls, spacing before the second and third only
        assert_eq!(provider.detail_fetches().len(), 3);
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
