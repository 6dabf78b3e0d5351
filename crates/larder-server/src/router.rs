use axum::routing::{get, put};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use larder_types::endpoints;

use crate::auth::require_bearer;
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Larder endpoints, nested under
/// `base_path` when it is non-empty.
///
/// The health check is never behind authentication.
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route(
            endpoints::LEFTOVERS,
            get(handler::list_leftovers).post(handler::create_leftover),
        )
        .route(
            endpoints::LEFTOVER,
            put(handler::update_leftover).delete(handler::delete_leftover),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .with_state(state);

    let app = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(base_path, api)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
