//! Router and handlers: `/` serves the page, `/weather/{city}` relays the
//! lookup to the upstream provider and normalizes failures.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use weather_core::{ErrorEnvelope, ProviderError, WeatherProvider, WeatherQuery};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/weather/{city}", get(relay_weather))
        .with_state(state)
}

/// GET / — the static presentation page, embedded at compile time.
async fn index() -> Html<&'static str> {
    Html(include_str!("../public/index.html"))
}

/// GET /weather/{city} — the relay endpoint.
///
/// Success passes the upstream JSON through unchanged with the upstream's own
/// status. A structured upstream failure keeps the upstream status and its
/// message as `details`; anything else becomes a 500 with a generic detail.
async fn relay_weather(State(state): State<AppState>, Path(city): Path<String>) -> Response {
    let query = WeatherQuery::new(city);

    match state.provider.current_by_city(&query).await {
        Ok(weather) => {
            let status = StatusCode::from_u16(weather.status).unwrap_or(StatusCode::OK);
            (status, Json(weather.body)).into_response()
        }
        Err(err) => {
            tracing::warn!(city = %query.city, error = %err, "weather lookup failed");
            let (status, details) = match err {
                ProviderError::Upstream { status, message } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message,
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            };
            (status, Json(ErrorEnvelope::new(details))).into_response()
        }
    }
}
