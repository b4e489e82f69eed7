//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Station;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Map page with the pin and station panel.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Initial map latitude (the fallback position)
    pub default_latitude: f64,

    /// Initial map longitude (the fallback position)
    pub default_longitude: f64,

    /// Search radius in miles
    pub default_radius: f64,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Station list fragment for the side panel.
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate {
    /// Stations to render, ascending by distance
    pub stations: Vec<StationView>,

    /// Fallback notice, when the default position was used
    pub notice: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// View model for one station row.
pub struct StationView {
    /// Display name
    pub name: String,

    /// Formatted distance (e.g. "0.62 mi")
    pub distance: String,

    /// Whether to show the accessibility marker
    pub accessible: bool,

    /// Line badges
    pub lines: Vec<LineView>,
}

/// View model for one line badge.
pub struct LineView {
    /// Badge symbol
    pub symbol: &'static str,

    /// Badge background color
    pub color: &'static str,

    /// Full line name (tooltip)
    pub name: &'static str,
}

impl StationView {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            distance: format!("{:.2} mi", station.distance_miles),
            accessible: station.wheelchair_accessible,
            lines: station
                .lines
                .iter()
                .map(|line| LineView {
                    symbol: line.symbol(),
                    color: line.color(),
                    name: line.name(),
                })
                .collect(),
        }
    }
}
