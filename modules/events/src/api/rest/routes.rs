use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// JSON API routes.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let api = Router::new()
        // GET /api/events - List events
        .route("/api/events", get(handlers::list_events))
        // GET /api/events/ - Slug segment left empty
        .route("/api/events/", get(handlers::get_event_without_slug))
        // GET /api/events/{slug} - Look an event up by slug
        .route("/api/events/{slug}", get(handlers::get_event))
        .layer(Extension(service));

    router.merge(api)
}
