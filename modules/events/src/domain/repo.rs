use crate::contract::model::{Booking, Event};
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: read access to events.
#[async_trait]
pub trait EventsRepository: Send + Sync {
    /// Load an event by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Event>>;
    /// Events ordered by creation time, at most `limit`.
    async fn list(&self, limit: u64) -> anyhow::Result<Vec<Event>>;
    /// Whether an event with this id exists.
    async fn exists(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Port for the domain layer: insert-only booking storage.
#[async_trait]
pub trait BookingsRepository: Send + Sync {
    /// Insert a fully-formed booking.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, b: Booking) -> anyhow::Result<()>;
    /// Bookings of one event ordered by creation time.
    async fn list_by_event(&self, event_id: Uuid) -> anyhow::Result<Vec<Booking>>;
    /// Number of bookings of one event.
    async fn count_by_event(&self, event_id: Uuid) -> anyhow::Result<u64>;
}
