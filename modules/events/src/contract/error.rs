use thiserror::Error;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Errors of the read operations that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum EventsError {
    #[error("Event not found: {slug}")]
    NotFound { slug: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database is not configured")]
    Configuration,

    #[error("Internal error")]
    Internal,
}

impl From<DomainError> for EventsError {
    fn from(domain_error: DomainError) -> Self {
        use DomainError::*;
        match domain_error {
            EventNotFound { slug } => Self::NotFound { slug },
            e @ (MissingSlug | InvalidSlug { .. } | InvalidEmail { .. }) => Self::Validation {
                message: e.to_string(),
            },
            BookingEventMissing { id } => Self::NotFound {
                slug: id.to_string(),
            },
            Configuration { .. } => Self::Configuration,
            Database { .. } => Self::Internal,
        }
    }
}

/// Discriminant of [`BookingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingErrorKind {
    Configuration,
    Validation,
    EventNotFound,
    Infrastructure,
}

/// Failure of the booking action. No internal details are carried.
#[derive(Error, Debug, Clone)]
pub enum BookingError {
    #[error("Database is not configured")]
    Configuration,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Event {event_id} does not exist")]
    EventNotFound { event_id: Uuid },

    #[error("Internal error")]
    Infrastructure,
}

impl BookingError {
    pub fn kind(&self) -> BookingErrorKind {
        match self {
            Self::Configuration => BookingErrorKind::Configuration,
            Self::Validation { .. } => BookingErrorKind::Validation,
            Self::EventNotFound { .. } => BookingErrorKind::EventNotFound,
            Self::Infrastructure => BookingErrorKind::Infrastructure,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(domain_error: DomainError) -> Self {
        use DomainError::*;
        match domain_error {
            BookingEventMissing { id } => Self::EventNotFound { event_id: id },
            e @ (MissingSlug | InvalidSlug { .. } | InvalidEmail { .. }) => Self::Validation {
                message: e.to_string(),
            },
            // a booking never looks events up by slug; keep the mapping total
            EventNotFound { .. } => Self::Infrastructure,
            Configuration { .. } => Self::Configuration,
            Database { .. } => Self::Infrastructure,
        }
    }
}
