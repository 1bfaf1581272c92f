use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Form, Path,
    },
    http::StatusCode,
    response::Html,
    Extension,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ui::{pages, widgets};
use crate::contract::{client::EventsApi, error::BookingError, error::BookingErrorKind, model::Event};
use crate::domain::{error::DomainError, service::Service};

type Page = (StatusCode, Html<String>);

/// Body of `POST /events/{slug}/book`.
#[derive(Debug, Deserialize)]
pub struct BookingFormInput {
    pub event_id: String,
    #[serde(default)]
    pub email: String,
}

/// Event detail page with its sign-up widget.
pub async fn event_page(
    Extension(svc): Extension<Arc<Service>>,
    slug: Result<Path<String>, PathRejection>,
) -> Page {
    let slug = match slug {
        Ok(Path(slug)) => slug,
        Err(rejection) => return rejected_path(rejection),
    };
    info!("Rendering event page for {:?}", slug);

    let event = match svc.get_event_by_slug(&slug).await {
        Ok(event) => event,
        Err(e) => return error_page(&e),
    };

    let widget = match registration_link(&event) {
        Some(link) => widgets::render_registration(link),
        None => widgets::BookingForm::new(event.id, &event.slug).render(),
    };
    render(&svc, &event, &widget, StatusCode::OK).await
}

/// Booking form submission; re-renders the page with the form's new state.
pub async fn submit_booking(
    Extension(svc): Extension<Arc<Service>>,
    Extension(api): Extension<Arc<dyn EventsApi>>,
    slug: Result<Path<String>, PathRejection>,
    input: Result<Form<BookingFormInput>, FormRejection>,
) -> Page {
    let slug = match slug {
        Ok(Path(slug)) => slug,
        Err(rejection) => return rejected_path(rejection),
    };
    info!("Booking submitted for {:?}", slug);

    let event = match svc.get_event_by_slug(&slug).await {
        Ok(event) => event,
        Err(e) => return error_page(&e),
    };

    let mut form = widgets::BookingForm::new(event.id, &event.slug);
    let input = match input {
        Ok(Form(input)) => input,
        Err(rejection) => {
            warn!("Booking form rejected: {}", rejection.body_text());
            let outcome = form.apply(Err(BookingError::validation("malformed booking form")));
            return render(&svc, &event, &form.render(), status_for(&outcome)).await;
        }
    };
    let outcome = match Uuid::parse_str(input.event_id.trim()) {
        Ok(event_id) if event_id == event.id => form.submit(api.as_ref(), &input.email).await,
        Ok(event_id) => {
            warn!(%event_id, "Booking form event id does not match the page");
            form.apply(Err(BookingError::validation("event id does not match the page")))
        }
        Err(_) => form.apply(Err(BookingError::validation("malformed event id"))),
    };

    render(&svc, &event, &form.render(), status_for(&outcome)).await
}

fn status_for(outcome: &Result<(), BookingError>) -> StatusCode {
    match outcome {
        Ok(()) => StatusCode::OK,
        Err(e) => match e.kind() {
            BookingErrorKind::Validation => StatusCode::BAD_REQUEST,
            BookingErrorKind::EventNotFound => StatusCode::NOT_FOUND,
            BookingErrorKind::Configuration | BookingErrorKind::Infrastructure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
    }
}

fn rejected_path(rejection: PathRejection) -> Page {
    warn!("Event page path rejected: {}", rejection.body_text());
    error_page(&DomainError::invalid_slug(rejection.body_text()))
}

async fn render(svc: &Service, event: &Event, widget: &str, status: StatusCode) -> Page {
    // The counter is decoration; a failure only hides it.
    let booked = if registration_link(event).is_none() {
        match svc.count_bookings(event.id).await {
            Ok(n) => Some(n),
            Err(e) => {
                warn!(error = %e, "Could not count bookings");
                None
            }
        }
    } else {
        None
    };
    (status, Html(pages::event_page(event, widget, booked)))
}

fn registration_link(event: &Event) -> Option<&str> {
    event
        .registration_link
        .as_deref()
        .filter(|link| !link.trim().is_empty())
}

fn error_page(e: &DomainError) -> Page {
    let (status, title, message) = match e {
        DomainError::MissingSlug | DomainError::InvalidSlug { .. } => {
            (StatusCode::BAD_REQUEST, "Invalid event address", e.to_string())
        }
        DomainError::EventNotFound { .. } => {
            (StatusCode::NOT_FOUND, "Event not found", e.to_string())
        }
        _ => {
            tracing::error!(error = ?e, "Failed to load event page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An error occurred while fetching the event".to_string(),
            )
        }
    };
    (status, Html(pages::error_page(title, &message)))
}
