use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An event as stored. Events are written by admin tooling; this crate only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub overview: Option<String>,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub organizer: String,
    /// External sign-up page; when set, visitors register there instead of booking here.
    pub registration_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A seat booked by email for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub event_id: Uuid,
    /// Trimmed and lowercased.
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input of the booking action.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub event_id: Uuid,
    /// Slug of the page the booking came from; used for tracing only.
    pub slug: String,
    pub email: String,
}
