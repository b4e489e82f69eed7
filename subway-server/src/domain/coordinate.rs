//! Geographic coordinate type and great-circle distance.

use std::fmt;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Conversion factor from kilometres to miles.
const KM_TO_MILES: f64 = 0.621371;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 coordinate in degrees.
///
/// Latitude is within [-90, 90], longitude within [-180, 180], and both
/// components are finite. This type guarantees that any `Coordinate` value
/// is valid by construction.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Coordinate;
///
/// let boston = Coordinate::new(42.3601, -71.0589).unwrap();
/// assert_eq!(boston.latitude(), 42.3601);
///
/// // Out-of-range components are rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, 181.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Fallback position used when no user position is available
    /// (downtown Boston).
    pub const DEFAULT: Coordinate = Coordinate {
        latitude: 42.3601,
        longitude: -71.0589,
    };

    /// Construct a coordinate, validating both components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "components must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another coordinate, in miles.
    ///
    /// Haversine formula over a spherical Earth of radius 6371 km.
    pub fn distance_miles(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c * KM_TO_MILES
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_ranges() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(42.3601, -71.0589).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Coordinate::new(90.001, 0.0).is_err());
        assert!(Coordinate::new(-90.001, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.001).is_err());
        assert!(Coordinate::new(0.0, -180.001).is_err());
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn default_is_downtown_boston() {
        assert_eq!(Coordinate::DEFAULT.latitude(), 42.3601);
        assert_eq!(Coordinate::DEFAULT.longitude(), -71.0589);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinate::new(42.3601, -71.0589).unwrap();
        assert_eq!(a.distance_miles(&a), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // One degree of latitude is ~111.19 km = ~69.09 miles.
        let a = Coordinate::new(42.0, -71.0).unwrap();
        let b = Coordinate::new(43.0, -71.0).unwrap();
        let d = a.distance_miles(&b);
        assert!((d - 69.09).abs() < 0.1, "got {d}");
    }

    #[test]
    fn one_kilometre_is_about_0_62_miles() {
        // 0.008993 degrees of latitude is almost exactly 1 km.
        let a = Coordinate::new(42.3601, -71.0589).unwrap();
        let b = Coordinate::new(42.3601 - 0.008993, -71.0589).unwrap();
        let d = a.distance_miles(&b);
        assert!((d - 0.6214).abs() < 0.001, "got {d}");
    }

    #[test]
    fn park_street_from_city_hall() {
        // Downtown query point to the Park Street platform coordinate.
        let origin = Coordinate::new(42.3601, -71.0589).unwrap();
        let park_street = Coordinate::new(42.3554, -71.0640).unwrap();
        let d = origin.distance_miles(&park_street);
        assert!((0.40..0.43).contains(&d), "got {d}");
    }

    #[test]
    fn display_rounds_to_six_decimals() {
        let a = Coordinate::new(42.36012345, -71.05891234).unwrap();
        assert_eq!(format!("{}", a), "(42.360123, -71.058912)");
    }
}
