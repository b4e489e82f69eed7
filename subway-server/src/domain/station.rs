//! Station output types.

use super::{Coordinate, Line};

/// Tri-state wheelchair accessibility as recorded on a stop.
///
/// Mirrors the GTFS `wheelchair_boarding` field: 0 = no information,
/// 1 = accessible, 2 = not accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    /// No information recorded (0, an unknown code, or the field is absent).
    NoInformation,
    /// Boarding is accessible (1).
    Accessible,
    /// Boarding is not accessible (2).
    Inaccessible,
}

impl Accessibility {
    /// Decode a raw `wheelchair_boarding` value.
    pub fn from_gtfs(value: Option<u8>) -> Self {
        match value {
            Some(1) => Accessibility::Accessible,
            Some(2) => Accessibility::Inaccessible,
            _ => Accessibility::NoInformation,
        }
    }

    /// Whether boarding is positively recorded as accessible.
    pub fn is_accessible(&self) -> bool {
        matches!(self, Accessibility::Accessible)
    }
}

/// A resolved station: a user-facing named place aggregating one or more
/// platform stops.
///
/// Stations are created per query and discarded when the pin moves or the
/// station display re-queries.
#[derive(Debug, Clone)]
pub struct Station {
    /// Id of the first constituent stop.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Coordinate of the closest constituent stop.
    pub coordinate: Coordinate,

    /// Great-circle distance from the query coordinate, in miles.
    pub distance_miles: f64,

    /// True if any constituent stop reports accessible boarding.
    pub wheelchair_accessible: bool,

    /// Unique lines serving the station, in canonical order.
    pub lines: Vec<Line>,

    /// Whether line data was fetched for this station. Stations beyond the
    /// top-N cap never get line data; the flag keeps that explicit rather
    /// than inferred from list position.
    pub has_route_data: bool,
}
