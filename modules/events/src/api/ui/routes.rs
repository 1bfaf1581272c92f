use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::ui::handlers;
use crate::contract::client::EventsApi;
use crate::domain::service::Service;

/// Server-rendered HTML routes.
pub fn register_routes(router: Router, service: Arc<Service>, api: Arc<dyn EventsApi>) -> Router {
    let pages = Router::new()
        // GET /events/{slug} - Event detail page
        .route("/events/{slug}", get(handlers::event_page))
        // POST /events/{slug}/book - Booking form submission
        .route("/events/{slug}/book", post(handlers::submit_booking))
        .layer(Extension(service))
        .layer(Extension(api));

    router.merge(pages)
}
