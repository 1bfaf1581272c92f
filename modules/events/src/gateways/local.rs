use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::EventsApi,
    error::{BookingError, EventsError},
    model::{Booking, Event, NewBooking},
};
use crate::domain::service::Service;

/// Local implementation of the EventsApi trait that delegates to the domain service
pub struct EventsLocalClient {
    service: Arc<Service>,
}

impl EventsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventsApi for EventsLocalClient {
    async fn get_event_by_slug(&self, slug: &str) -> Result<Event, EventsError> {
        self.service
            .get_event_by_slug(slug)
            .await
            .map_err(Into::into)
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventsError> {
        self.service.list_events().await.map_err(Into::into)
    }

    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking, BookingError> {
        self.service
            .create_booking(new_booking)
            .await
            .map_err(Into::into)
    }

    async fn list_bookings(&self, event_id: Uuid) -> Result<Vec<Booking>, EventsError> {
        self.service
            .list_bookings(event_id)
            .await
            .map_err(Into::into)
    }
}
