//! API routes
//!
//! - [`availability`] — published calendar and per-slot taken counts
//! - [`book`] — booking admission (cash confirm or card redirect)
//! - [`checkout`] — payment session for an already admitted card booking
//! - [`health`] — health check

pub mod availability;
pub mod book;
pub mod checkout;
pub mod health;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
///
/// CORS is permissive: the static booking form is hosted separately and
/// calls the API cross-origin.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/availability", get(availability::get_availability))
        .route("/api/calendar", get(availability::get_calendar))
        .route("/api/book", post(book::book))
        .route("/api/checkout", post(checkout::create_checkout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
