use crate::handlers;
use crate::middleware::auth::require_auth;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::trace::TraceLayer;

/// Build the router: public health check plus routes behind bearer auth.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/whoami", get(handlers::whoami))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
