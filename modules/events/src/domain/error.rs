use eventbook_db::DbError;
use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Configuration { message: String },

    #[error("Slug parameter is required")]
    MissingSlug,

    #[error("Invalid slug format. Slug must contain only lowercase letters, numbers, and hyphens")]
    InvalidSlug { slug: String },

    #[error("Please provide a valid email address")]
    InvalidEmail { email: String },

    #[error("Event with slug \"{slug}\" not found")]
    EventNotFound { slug: String },

    #[error("Event with ID {id} does not exist. Cannot create booking for non-existent event.")]
    BookingEventMissing { id: Uuid },

    #[error("{message}")]
    Database { message: String },
}

impl DomainError {
    pub fn invalid_slug(slug: impl Into<String>) -> Self {
        Self::InvalidSlug { slug: slug.into() }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn event_not_found(slug: impl Into<String>) -> Self {
        Self::EventNotFound { slug: slug.into() }
    }

    pub fn booking_event_missing(id: Uuid) -> Self {
        Self::BookingEventMissing { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Caller input problem (4xx), as opposed to configuration or infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSlug
                | Self::InvalidSlug { .. }
                | Self::InvalidEmail { .. }
                | Self::EventNotFound { .. }
                | Self::BookingEventMissing { .. }
        )
    }
}

impl From<DbError> for DomainError {
    fn from(e: DbError) -> Self {
        if e.is_config() {
            Self::Configuration {
                message: e.to_string(),
            }
        } else {
            Self::database(e.to_string())
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
