use std::sync::Arc;

use chrono::Utc;
use eventbook_db::DbManager;
use sea_orm::{DbErr, SqlErr};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{Booking, Event, NewBooking};
use crate::domain::error::DomainError;
use crate::domain::repo::{BookingsRepository, EventsRepository};
use crate::domain::validation::{check_slug, normalize_email};
use crate::infra::storage::sea_orm_repo::SeaOrmRepository;

/// Domain service for event lookup and booking.
///
/// Every operation first obtains the shared handle from the connection
/// manager, so a missing database URL surfaces on first use, not at startup.
#[derive(Clone)]
pub struct Service {
    db: Arc<DbManager>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub list_limit: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { list_limit: 100 }
    }
}

impl Service {
    pub fn new(db: Arc<DbManager>, config: ServiceConfig) -> Self {
        Self { db, config }
    }

    async fn repo(&self) -> Result<SeaOrmRepository<sea_orm::DatabaseConnection>, DomainError> {
        let handle = self.db.connect().await?;
        Ok(SeaOrmRepository::new(handle.sea()))
    }

    #[instrument(name = "events.service.get_event_by_slug", skip(self))]
    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Event, DomainError> {
        debug!("Getting event by slug");

        let repo = self.repo().await?;
        let slug = check_slug(slug)?;

        let event = repo
            .find_by_slug(slug)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?
            .ok_or_else(|| DomainError::event_not_found(slug))?;
        debug!(event_id = %event.id, "Successfully retrieved event");
        Ok(event)
    }

    #[instrument(name = "events.service.list_events", skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>, DomainError> {
        let repo = self.repo().await?;
        let events = repo
            .list(self.config.list_limit)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;
        debug!("Listed {} events", events.len());
        Ok(events)
    }

    /// Book a seat. The event must exist when the booking is written; the
    /// `bookings.event_id` foreign key backs the check against a concurrent delete.
    #[instrument(
        name = "events.service.create_booking",
        skip(self, new_booking),
        fields(event_id = %new_booking.event_id, slug = %new_booking.slug)
    )]
    pub async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking, DomainError> {
        info!("Creating booking");

        let result = self.try_create_booking(new_booking).await;
        match &result {
            Ok(booking) => info!(booking_id = %booking.id, "Successfully created booking"),
            Err(e) if e.is_client_error() => warn!(error = %e, "Booking rejected"),
            Err(e) => error!(error = %e, "Booking failed"),
        }
        result
    }

    async fn try_create_booking(&self, new_booking: NewBooking) -> Result<Booking, DomainError> {
        let repo = self.repo().await?;
        let email = normalize_email(&new_booking.email)?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            event_id: new_booking.event_id,
            email,
            created_at: now,
            updated_at: now,
        };

        let exists = repo
            .exists(booking.event_id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;
        if !exists {
            return Err(DomainError::booking_event_missing(booking.event_id));
        }

        // Autocommit insert: SQLite takes the write lock here and honours the busy timeout.
        repo.insert(booking.clone()).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::booking_event_missing(booking.event_id)
            } else {
                DomainError::database(format!("{e:#}"))
            }
        })?;

        Ok(booking)
    }

    #[instrument(name = "events.service.list_bookings", skip(self), fields(event_id = %event_id))]
    pub async fn list_bookings(&self, event_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let repo = self.repo().await?;
        repo.list_by_event(event_id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))
    }

    #[instrument(name = "events.service.count_bookings", skip(self), fields(event_id = %event_id))]
    pub async fn count_bookings(&self, event_id: Uuid) -> Result<u64, DomainError> {
        let repo = self.repo().await?;
        repo.count_by_event(event_id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))
    }
}

/// True when a repository error is the store rejecting a dangling reference.
pub fn is_foreign_key_violation(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
        Some(SqlErr::ForeignKeyConstraintViolation(_))
    )
}
