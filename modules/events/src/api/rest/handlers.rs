use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path},
    response::Json,
    Extension,
};
use tracing::{info, warn};

use crate::api::rest::dto::{EventDto, EventEnvelope, EventListEnvelope, EventSummaryDto};
use crate::api::rest::error::{map_domain_error, ApiFailure};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

const LOOKUP_FAILED: &str = "An error occurred while fetching the event";
const LIST_FAILED: &str = "An error occurred while fetching events";

/// Get one event by slug
pub async fn get_event(
    Extension(svc): Extension<Arc<Service>>,
    slug: Result<Path<String>, PathRejection>,
) -> Result<Json<EventEnvelope>, ApiFailure> {
    match slug {
        Ok(Path(slug)) => lookup(&svc, &slug).await,
        Err(rejection) => {
            // e.g. a percent-encoded segment that is not UTF-8
            warn!("Event lookup path rejected: {}", rejection.body_text());
            let e = DomainError::invalid_slug(rejection.body_text());
            Err(map_domain_error(&e, LOOKUP_FAILED))
        }
    }
}

/// `GET /api/events/`: the slug segment is empty
pub async fn get_event_without_slug(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<EventEnvelope>, ApiFailure> {
    lookup(&svc, "").await
}

async fn lookup(svc: &Service, slug: &str) -> Result<Json<EventEnvelope>, ApiFailure> {
    info!("Getting event with slug: {:?}", slug);

    match svc.get_event_by_slug(slug).await {
        Ok(event) => Ok(Json(EventEnvelope {
            success: true,
            message: "Event fetched successfully".to_string(),
            event: Some(EventDto::from(event)),
            error: None,
        })),
        Err(e) => {
            if e.is_client_error() {
                warn!("Event lookup for {:?} rejected: {}", slug, e);
            }
            Err(map_domain_error(&e, LOOKUP_FAILED))
        }
    }
}

/// List events, oldest first
pub async fn list_events(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<EventListEnvelope>, ApiFailure> {
    info!("Listing events");

    match svc.list_events().await {
        Ok(events) => Ok(Json(EventListEnvelope {
            success: true,
            message: "Events fetched successfully".to_string(),
            events: events.into_iter().map(EventSummaryDto::from).collect(),
        })),
        Err(e) => Err(map_domain_error(&e, LIST_FAILED)),
    }
}
