//! Stop grouping and station merging.
//!
//! Raw stop records describe individual platforms. Physically co-located
//! platforms share a station name and coordinate; grouping collapses them
//! before distance ranking. A second, name-only merge unions stations
//! whose names differ only in case or surrounding whitespace.

use std::collections::HashMap;

use crate::domain::{Accessibility, Coordinate, Station};
use crate::mbta::StopResource;

/// Key for the platform grouping: trimmed name plus coordinates rounded
/// to a fixed number of decimal places.
type GroupKey = (String, i64, i64);

/// A set of platform stops sharing a (name, rounded-coordinate) key.
///
/// Platforms recorded with slightly different coordinates land in separate
/// groups; the later name merge may still union them.
#[derive(Debug, Clone)]
pub struct StationGroup {
    /// Constituent stops; never empty. The first stop supplies the
    /// station id.
    pub stops: Vec<StopResource>,

    /// Trimmed display name shared by the stops.
    pub name: String,

    /// Coordinate of the first stop.
    pub coordinate: Coordinate,

    /// Distance from the query coordinate, in miles.
    pub distance_miles: f64,
}

impl StationGroup {
    /// True if any constituent platform reports accessible boarding.
    pub fn wheelchair_accessible(&self) -> bool {
        self.stops
            .iter()
            .any(|s| Accessibility::from_gtfs(s.attributes.wheelchair_boarding).is_accessible())
    }
}

fn group_key(name: &str, latitude: f64, longitude: f64, decimals: u32) -> GroupKey {
    let scale = 10f64.powi(decimals as i32);
    (
        name.trim().to_string(),
        (latitude * scale).round() as i64,
        (longitude * scale).round() as i64,
    )
}

/// Group raw stops into stations near `origin`.
///
/// Stops are grouped by (trimmed name, rounded coordinate); each group's
/// distance is computed from its first stop's coordinate. Groups farther
/// than `radius_miles` are discarded and the survivors are returned in
/// ascending distance order.
///
/// Stops missing a name or coordinate cannot be grouped and are skipped.
pub fn nearby_groups(
    stops: Vec<StopResource>,
    origin: &Coordinate,
    radius_miles: f64,
    decimals: u32,
) -> Vec<StationGroup> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut by_key: HashMap<GroupKey, (Coordinate, Vec<StopResource>)> = HashMap::new();

    for stop in stops {
        let (Some(name), Some(lat), Some(lon)) = (
            stop.attributes.name.as_deref(),
            stop.attributes.latitude,
            stop.attributes.longitude,
        ) else {
            tracing::debug!(stop = %stop.id, "skipping stop without name or coordinate");
            continue;
        };

        let key = group_key(name, lat, lon, decimals);
        match by_key.get_mut(&key) {
            Some((_, members)) => members.push(stop),
            None => {
                let Ok(coordinate) = Coordinate::new(lat, lon) else {
                    tracing::debug!(stop = %stop.id, "skipping stop with out-of-range coordinate");
                    continue;
                };
                order.push(key.clone());
                by_key.insert(key, (coordinate, vec![stop]));
            }
        }
    }

    let mut groups: Vec<StationGroup> = Vec::new();
    for key in order {
        let Some((coordinate, stops)) = by_key.remove(&key) else {
            continue;
        };

        let distance_miles = origin.distance_miles(&coordinate);
        if distance_miles > radius_miles {
            continue;
        }

        groups.push(StationGroup {
            stops,
            name: key.0,
            coordinate,
            distance_miles,
        });
    }

    groups.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    groups
}

/// Merge stations whose names are equal after trimming, case-insensitively.
///
/// Later duplicates fold into the first occurrence: lines are unioned,
/// accessibility is OR'd, and the closer distance and coordinate win. The
/// input order is preserved; the list is not re-sorted even when a merge
/// lowers an entry's distance.
pub fn merge_by_name(stations: Vec<Station>) -> Vec<Station> {
    let mut merged: Vec<Station> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for station in stations {
        let key = station.name.trim().to_lowercase();
        match index_by_name.get(&key) {
            Some(&i) => {
                let existing = &mut merged[i];
                for line in station.lines {
                    if !existing.lines.contains(&line) {
                        existing.lines.push(line);
                    }
                }
                existing.lines.sort();
                existing.wheelchair_accessible |= station.wheelchair_accessible;
                existing.has_route_data |= station.has_route_data;
                if station.distance_miles < existing.distance_miles {
                    existing.distance_miles = station.distance_miles;
                    existing.coordinate = station.coordinate;
                }
            }
            None => {
                index_by_name.insert(key, merged.len());
                merged.push(station);
            }
        }
    }

    merged
}
