//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, Station};

/// Request for nearby stations.
#[derive(Debug, Deserialize)]
pub struct NearbyStationsRequest {
    /// Query latitude in degrees
    pub lat: Option<f64>,

    /// Query longitude in degrees
    pub lon: Option<f64>,

    /// Search radius in miles (defaults to the widget's fixed radius)
    pub radius: Option<f64>,

    /// Geolocation failure reported by the page (W3C code or name)
    pub geo_error: Option<String>,
}

/// A line badge in station results.
#[derive(Debug, Serialize)]
pub struct LineResult {
    /// Line name (e.g. "Green Line B")
    pub name: &'static str,

    /// Badge symbol (e.g. "GL-B")
    pub symbol: &'static str,

    /// Hex display color
    pub color: &'static str,
}

impl LineResult {
    /// Create from a domain Line.
    pub fn from_line(line: Line) -> Self {
        Self {
            name: line.name(),
            symbol: line.symbol(),
            color: line.color(),
        }
    }
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Id of the first constituent stop
    pub id: String,

    /// Display name
    pub name: String,

    /// Station latitude in degrees
    pub latitude: f64,

    /// Station longitude in degrees
    pub longitude: f64,

    /// Distance from the query coordinate, in miles
    pub distance_miles: f64,

    /// Whether any platform reports accessible boarding
    pub wheelchair_accessible: bool,

    /// Lines serving the station
    pub lines: Vec<LineResult>,

    /// Whether line data was fetched for this station
    pub has_route_data: bool,
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            latitude: station.coordinate.latitude(),
            longitude: station.coordinate.longitude(),
            distance_miles: station.distance_miles,
            wheelchair_accessible: station.wheelchair_accessible,
            lines: station
                .lines
                .iter()
                .map(|line| LineResult::from_line(*line))
                .collect(),
            has_route_data: station.has_route_data,
        }
    }
}

/// Where the query coordinate came from.
#[derive(Debug, Serialize)]
pub struct QueryInfo {
    /// Effective query latitude
    pub latitude: f64,

    /// Effective query longitude
    pub longitude: f64,

    /// Effective search radius in miles
    pub radius_miles: f64,

    /// True when the fallback position was used
    pub used_fallback: bool,

    /// Notice explaining the fallback, when used
    pub notice: Option<String>,
}

/// Response for nearby stations.
#[derive(Debug, Serialize)]
pub struct NearbyStationsResponse {
    /// The effective query
    pub query: QueryInfo,

    /// Nearest stations, ascending by distance
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
