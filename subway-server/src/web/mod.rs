//! Web layer for the station finder.
//!
//! Provides the map page and the nearby-stations endpoint consumed by it.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
