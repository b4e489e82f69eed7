//! Route classification.
//!
//! Maps raw route records onto display lines by case-sensitive substring
//! matching over the route id and names. Rules are checked in a fixed
//! priority order; the first match wins. A route that matches no rule is
//! simply unclassified, never an error.

use std::collections::HashMap;

use crate::domain::Line;
use crate::mbta::RouteResource;

/// Green Line branches, checked in order after the "Green" family match.
const GREEN_BRANCHES: [(&str, Line); 4] = [
    ("B", Line::GreenB),
    ("C", Line::GreenC),
    ("D", Line::GreenD),
    ("E", Line::GreenE),
];

/// Classify a route record into a display line.
///
/// Matching is case-sensitive and runs over the concatenated route id,
/// long name, and short name. Green branch detection requires both
/// "Green" and the branch letter; a Green route with no branch letter
/// defaults to the B branch. Missing attributes contribute nothing to
/// the text and therefore cannot match.
pub fn classify(route: &RouteResource) -> Option<Line> {
    classify_text(&search_text(route))
}

/// Build the route-id → line lookup for a fetched route list.
///
/// Unclassified routes are dropped from the lookup.
pub fn line_lookup(routes: &[RouteResource]) -> HashMap<String, Line> {
    routes
        .iter()
        .filter_map(|r| classify(r).map(|line| (r.id.clone(), line)))
        .collect()
}

/// Concatenate the searchable text of a route record.
fn search_text(route: &RouteResource) -> String {
    let mut text = route.id.clone();
    for part in [
        route.attributes.long_name.as_deref(),
        route.attributes.short_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        text.push(' ');
        text.push_str(part);
    }
    text
}

fn classify_text(text: &str) -> Option<Line> {
    if text.contains("Red") {
        return Some(Line::Red);
    }
    if text.contains("Orange") {
        return Some(Line::Orange);
    }
    if text.contains("Blue") {
        return Some(Line::Blue);
    }
    if text.contains("Green") {
        for (letter, line) in GREEN_BRANCHES {
            if text.contains(letter) {
                return Some(line);
            }
        }
        // An unbranched Green route defaults to the B branch.
        return Some(Line::GreenB);
    }
    if text.contains("Mattapan") {
        return Some(Line::Mattapan);
    }
    None
}
