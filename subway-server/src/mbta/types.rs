//! MBTA V3 API response DTOs.
//!
//! These types map directly to the JSON:API envelope the MBTA returns:
//! a top-level `data` array of `{id, type, attributes}` resources. The
//! attribute fields use `Option` liberally because the API omits fields
//! it has no value for.

use serde::Deserialize;

/// A stop resource from the `data` array.
#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    /// Stop id (e.g. "70076" for a Park Street platform).
    pub id: String,

    /// Stop attributes.
    pub attributes: StopAttributes,
}

/// Attributes of a stop.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopAttributes {
    /// Display name of the stop.
    pub name: Option<String>,

    /// Latitude in degrees.
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    pub longitude: Option<f64>,

    /// GTFS wheelchair boarding code: 0 = no information, 1 = accessible,
    /// 2 = not accessible.
    pub wheelchair_boarding: Option<u8>,
}

impl StopResource {
    /// Convenience constructor for fixture data.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        wheelchair_boarding: u8,
    ) -> Self {
        Self {
            id: id.into(),
            attributes: StopAttributes {
                name: Some(name.into()),
                latitude: Some(latitude),
                longitude: Some(longitude),
                wheelchair_boarding: Some(wheelchair_boarding),
            },
        }
    }
}

/// A route resource from the `data` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    /// Route id (e.g. "Red", "Green-B", "Mattapan").
    pub id: String,

    /// Route attributes.
    pub attributes: RouteAttributes,
}

/// Attributes of a route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteAttributes {
    /// Full route name (e.g. "Green Line B").
    pub long_name: Option<String>,

    /// Short route name (e.g. "B"); empty for most subway routes.
    pub short_name: Option<String>,

    /// GTFS route type: 0 = light rail, 1 = heavy rail.
    pub route_type: Option<u8>,
}

impl RouteResource {
    /// Convenience constructor for fixture data.
    pub fn new(id: impl Into<String>, long_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: RouteAttributes {
                long_name: Some(long_name.into()),
                short_name: None,
                route_type: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stop_resource() {
        let json = r#"{
            "id": "70076",
            "type": "stop",
            "attributes": {
                "name": "Park Street",
                "latitude": 42.35639457,
                "longitude": -71.0624242,
                "wheelchair_boarding": 1
            }
        }"#;

        let stop: StopResource = serde_json::from_str(json).unwrap();
        assert_eq!(stop.id, "70076");
        assert_eq!(stop.attributes.name.as_deref(), Some("Park Street"));
        assert_eq!(stop.attributes.wheelchair_boarding, Some(1));
    }

    #[test]
    fn deserialize_stop_with_missing_attributes() {
        let json = r#"{"id": "x", "type": "stop", "attributes": {}}"#;

        let stop: StopResource = serde_json::from_str(json).unwrap();
        assert_eq!(stop.id, "x");
        assert!(stop.attributes.name.is_none());
        assert!(stop.attributes.latitude.is_none());
    }

    #[test]
    fn deserialize_route_resource() {
        let json = r#"{
            "id": "Green-B",
            "type": "route",
            "attributes": {
                "long_name": "Green Line B",
                "short_name": "B",
                "route_type": 0
            }
        }"#;

        let route: RouteResource = serde_json::from_str(json).unwrap();
        assert_eq!(route.id, "Green-B");
        assert_eq!(route.attributes.long_name.as_deref(), Some("Green Line B"));
        assert_eq!(route.attributes.route_type, Some(0));
    }

    #[test]
    fn extra_attributes_are_ignored() {
        let json = r#"{
            "id": "Red",
            "type": "route",
            "attributes": {
                "long_name": "Red Line",
                "color": "DA291C",
                "description": "Rapid Transit"
            }
        }"#;

        let route: RouteResource = serde_json::from_str(json).unwrap();
        assert_eq!(route.attributes.long_name.as_deref(), Some("Red Line"));
    }
}
