use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::{BookingError, EventsError},
    model::{Booking, Event, NewBooking},
};

/// Public API of the events module for in-process callers
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Get an event by its slug
    async fn get_event_by_slug(&self, slug: &str) -> Result<Event, EventsError>;

    /// List events, oldest first
    async fn list_events(&self) -> Result<Vec<Event>, EventsError>;

    /// Book a seat for an existing event
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking, BookingError>;

    /// Bookings of one event, oldest first
    async fn list_bookings(&self, event_id: Uuid) -> Result<Vec<Booking>, EventsError>;
}
