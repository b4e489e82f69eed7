//! Mock transit provider for testing without API access.
//!
//! Serves fixture routes and stops from memory and records the per-stop
//! detail fetches it receives, so tests can assert on call order.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::resolver::TransitProvider;

use super::error::MbtaError;
use super::types::{RouteResource, StopResource};

/// In-memory `TransitProvider` serving fixture data.
#[derive(Default)]
pub struct MockTransit {
    routes: Vec<RouteResource>,
    stops: Vec<StopResource>,
    stop_routes: HashMap<String, Vec<RouteResource>>,
    fail_detail_for: HashSet<String>,
    fail_routes: bool,
    fail_stops: bool,
    detail_calls: Mutex<Vec<String>>,
}

impl MockTransit {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full route list.
    pub fn with_routes(mut self, routes: Vec<RouteResource>) -> Self {
        self.routes = routes;
        self
    }

    /// Set the stop list.
    pub fn with_stops(mut self, stops: Vec<StopResource>) -> Self {
        self.stops = stops;
        self
    }

    /// Set the routes returned for one stop's detail fetch.
    pub fn with_stop_routes(mut self, stop_id: &str, routes: Vec<RouteResource>) -> Self {
        self.stop_routes.insert(stop_id.to_string(), routes);
        self
    }

    /// Make the detail fetch for one stop fail.
    pub fn failing_detail_for(mut self, stop_id: &str) -> Self {
        self.fail_detail_for.insert(stop_id.to_string());
        self
    }

    /// Make the full route fetch fail.
    pub fn failing_routes(mut self) -> Self {
        self.fail_routes = true;
        self
    }

    /// Make the stop fetch fail.
    pub fn failing_stops(mut self) -> Self {
        self.fail_stops = true;
        self
    }

    /// The stop ids whose detail was fetched, in call order.
    pub fn detail_fetches(&self) -> Vec<String> {
        self.detail_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl TransitProvider for MockTransit {
    async fn subway_routes(&self) -> Result<Arc<Vec<RouteResource>>, MbtaError> {
        if self.fail_routes {
            return Err(MbtaError::Api {
                status: 500,
                message: "mock route failure".to_string(),
            });
        }
        Ok(Arc::new(self.routes.clone()))
    }

    async fn subway_stops(&self) -> Result<Vec<StopResource>, MbtaError> {
        if self.fail_stops {
            return Err(MbtaError::Api {
                status: 500,
                message: "mock stop failure".to_string(),
            });
        }
        Ok(self.stops.clone())
    }

    async fn routes_serving_stop(&self, stop_id: &str) -> Result<Vec<RouteResource>, MbtaError> {
        if let Ok(mut calls) = self.detail_calls.lock() {
            calls.push(stop_id.to_string());
        }

        if self.fail_detail_for.contains(stop_id) {
            return Err(MbtaError::RateLimited);
        }

        Ok(self.stop_routes.get(stop_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_fixture_data() {
        let mock = MockTransit::new()
            .with_routes(vec![RouteResource::new("Red", "Red Line")])
            .with_stops(vec![StopResource::new(
                "70076",
                "Park Street",
                42.3564,
                -71.0624,
                1,
            )])
            .with_stop_routes("70076", vec![RouteResource::new("Red", "Red Line")]);

        assert_eq!(mock.subway_routes().await.unwrap().len(), 1);
        assert_eq!(mock.subway_stops().await.unwrap().len(), 1);
        assert_eq!(mock.routes_serving_stop("70076").await.unwrap().len(), 1);
        assert_eq!(mock.detail_fetches(), vec!["70076".to_string()]);
    }

    #[tokio::test]
    async fn unknown_stop_has_no_routes() {
        let mock = MockTransit::new();
        assert!(mock.routes_serving_stop("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn injected_failures() {
        let mock = MockTransit::new()
            .failing_routes()
            .failing_stops()
            .failing_detail_for("bad");

        assert!(mock.subway_routes().await.is_err());
        assert!(mock.subway_stops().await.is_err());
        assert!(mock.routes_serving_stop("bad").await.is_err());
        assert!(mock.routes_serving_stop("good").await.is_ok());
    }
}
