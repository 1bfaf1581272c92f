//! SeaORM-backed repository implementation for the domain ports.
//!
//! Generic over `C: ConnectionTrait`, so it runs on a `DatabaseConnection`
//! **or** on a `DatabaseTransaction`.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::contract::model::{Booking, Event};
use crate::domain::repo::{BookingsRepository, EventsRepository};
use crate::infra::storage::entity::{booking, event};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> EventsRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Event>> {
        let found = event::Entity::find()
            .filter(event::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("find_by_slug failed")?;
        Ok(found.map(Into::into))
    }

    async fn list(&self, limit: u64) -> anyhow::Result<Vec<Event>> {
        let rows = event::Entity::find()
            .order_by_asc(event::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("list events failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists(&self, id: Uuid) -> anyhow::Result<bool> {
        let count = event::Entity::find_by_id(id)
            .count(&self.conn)
            .await
            .context("event exists check failed")?;
        Ok(count > 0)
    }
}

#[async_trait::async_trait]
impl<C> BookingsRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, b: Booking) -> anyhow::Result<()> {
        let m = booking::ActiveModel {
            id: Set(b.id),
            event_id: Set(b.event_id),
            email: Set(b.email),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        };
        let _ = m.insert(&self.conn).await.context("insert booking failed")?;
        Ok(())
    }

    async fn list_by_event(&self, event_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        let rows = booking::Entity::find()
            .filter(booking::Column::EventId.eq(event_id))
            .order_by_asc(booking::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("list bookings failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_event(&self, event_id: Uuid) -> anyhow::Result<u64> {
        booking::Entity::find()
            .filter(booking::Column::EventId.eq(event_id))
            .count(&self.conn)
            .await
            .context("count bookings failed")
    }
}
