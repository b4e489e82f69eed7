//! Geolocation fallback.
//!
//! The map page asks the browser for a position. On any failure -- denial,
//! no fix, or a timeout -- the widget falls back to a fixed downtown
//! coordinate so the map stays usable, with a notice explaining why.

use crate::domain::Coordinate;

/// Why the browser could not supply a position.
///
/// Mirrors the W3C GeolocationPositionError codes (1, 2, 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationFailure {
    /// Code 1: the user denied the permission prompt.
    Denied,
    /// Code 2: no position could be determined.
    Unavailable,
    /// Code 3: the lookup timed out.
    Timeout,
}

impl GeolocationFailure {
    /// Parse the failure reported by the page, as a numeric W3C code or a
    /// name. Unknown values parse to `None` and get the generic notice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "denied" => Some(Self::Denied),
            "2" | "unavailable" => Some(Self::Unavailable),
            "3" | "timeout" => Some(Self::Timeout),
            _ => None,
        }
    }

    /// User-facing explanation shown alongside the fallback position.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Denied => "Location access was denied; showing downtown Boston instead.",
            Self::Unavailable => "Your location is unavailable; showing downtown Boston instead.",
            Self::Timeout => "Locating you took too long; showing downtown Boston instead.",
        }
    }
}

/// Resolve a missing or failed geolocation to the fallback position.
///
/// Never an error: the map must stay usable whatever the browser reports.
pub fn fallback(failure: Option<GeolocationFailure>) -> (Coordinate, &'static str) {
    let notice = match failure {
        Some(failure) => failure.notice(),
        None => "No location was provided; showing downtown Boston instead.",
    };

    (Coordinate::DEFAULT, notice)
}
