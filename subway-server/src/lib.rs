//! Nearby subway station server.
//!
//! A web application that answers: "which subway stations are closest
//! to this point on the map?"

pub mod cache;
pub mod classify;
pub mod domain;
pub mod geolocate;
pub mod mbta;
pub mod resolver;
pub mod web;
