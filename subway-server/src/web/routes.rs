//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::domain::Coordinate;
use crate::geolocate::{self, GeolocationFailure};
use crate::resolver::{ResolveError, StationResolver};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Fixed search radius used when the request does not supply one.
const DEFAULT_RADIUS_MILES: f64 = 1.25;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations/nearby", get(nearby_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
async fn index_page() -> IndexTemplate {
    IndexTemplate {
        default_latitude: Coordinate::DEFAULT.latitude(),
        default_longitude: Coordinate::DEFAULT.longitude(),
        default_radius: DEFAULT_RADIUS_MILES,
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// List the nearest subway stations around a coordinate.
///
/// A missing coordinate or a reported geolocation failure never errors:
/// the query falls back to the fixed downtown position with a notice.
async fn nearby_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<NearbyStationsRequest>,
) -> Result<Response, AppError> {
    let radius = req.radius.unwrap_or(DEFAULT_RADIUS_MILES);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius}"),
        });
    }

    let (origin, notice) = match (req.lat, req.lon) {
        (Some(lat), Some(lon)) => {
            let origin = Coordinate::new(lat, lon).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?;
            (origin, None)
        }
        _ => {
            let failure = req.geo_error.as_deref().and_then(GeolocationFailure::parse);
            let (origin, notice) = geolocate::fallback(failure);
            (origin, Some(notice.to_string()))
        }
    };

    let resolver = StationResolver::new(&*state.mbta, &state.config);
    let stations = resolver
        .resolve(origin, radius)
        .await
        .map_err(AppError::from)?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = StationListTemplate {
            stations: stations.iter().map(StationView::from_station).collect(),
            notice: notice.clone(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let response = NearbyStationsResponse {
            query: QueryInfo {
                latitude: origin.latitude(),
                longitude: origin.longitude(),
                radius_miles: radius,
                used_fallback: notice.is_some(),
                notice,
            },
            stations: stations.iter().map(StationResult::from_station).collect(),
        };

        Ok(Json(response).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        tracing::error!(status = %status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
