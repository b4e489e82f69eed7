//! MBTA V3 API client.
//!
//! This module provides an HTTP client for the MBTA V3 API, which serves
//! Greater Boston transit data.
//!
//! Key characteristics of the V3 API:
//! - Every response is a JSON:API envelope: a top-level `data` array of
//!   `{id, type, attributes}` resources
//! - Anonymous access is allowed but aggressively rate limited (HTTP 429);
//!   sending an `x-api-key` header raises the limit
//! - Subway coverage is route types 0 (light rail) and 1 (heavy rail)

mod client;
mod error;
mod mock;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use error::MbtaError;
pub use mock::MockTransit;
pub use types::{RouteAttributes, RouteResource, StopAttributes, StopResource};
