use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::Event;

/// REST DTO for event representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub organizer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the event list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryDto {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub location: String,
}

/// Response envelope of `GET /api/events/{slug}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response envelope of `GET /api/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListEnvelope {
    pub success: bool,
    pub message: String,
    pub events: Vec<EventSummaryDto>,
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            slug: e.slug,
            title: e.title,
            description: e.description,
            overview: e.overview,
            image: e.image,
            venue: e.venue,
            location: e.location,
            date: e.date,
            time: e.time,
            mode: e.mode,
            audience: e.audience,
            organizer: e.organizer,
            registration_link: e.registration_link,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<Event> for EventSummaryDto {
    fn from(e: Event) -> Self {
        Self {
            slug: e.slug,
            title: e.title,
            date: e.date,
            location: e.location,
        }
    }
}
