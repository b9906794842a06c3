//! Proxy Routes
//!
//! Configures the Axum router that hands every request to the proxy handler.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{proxy_handler, AppState};

/// Creates the proxy router.
///
/// There are no routes of its own: every method and path belongs to the
/// origin, so everything goes through the fallback.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
