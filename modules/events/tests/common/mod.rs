#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{Duration, Utc};
use eventbook_db::{ConnectOpts, DbManager};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use tower::ServiceExt;
use uuid::Uuid;

use events::config::EventsConfig;
use events::contract::model::Event;
use events::infra::storage::entity::{booking, event};
use events::EventsModule;

/// In-memory SQLite lives as long as its single pooled connection.
fn memory_opts() -> ConnectOpts {
    ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    }
}

/// Manager over a fresh in-memory database with migrations applied.
pub async fn migrated_db() -> Arc<DbManager> {
    let db = unmigrated_db();
    let handle = db.connect().await.expect("connect in-memory sqlite");
    EventsModule::migrate(&handle)
        .await
        .expect("Failed to run migrations");
    db
}

/// Manager over a fresh in-memory database without any tables.
pub fn unmigrated_db() -> Arc<DbManager> {
    Arc::new(DbManager::new(Some("sqlite::memory:".into()), memory_opts()))
}

/// Manager over a migrated SQLite file in `dir`, pooling several connections.
pub async fn migrated_file_db(dir: &std::path::Path, max_conns: u32) -> Arc<DbManager> {
    let path = dir.join("eventbook.db");
    let dsn = format!("sqlite://{}?mode=rwc", path.to_string_lossy().replace('\\', "/"));
    let opts = ConnectOpts {
        max_conns: Some(max_conns),
        ..Default::default()
    };
    let db = Arc::new(DbManager::new(Some(dsn), opts));
    let handle = db.connect().await.expect("connect sqlite file");
    EventsModule::migrate(&handle)
        .await
        .expect("Failed to run migrations");
    db
}

/// Manager with no database URL at all.
pub fn unconfigured_db() -> Arc<DbManager> {
    Arc::new(DbManager::new(None, memory_opts()))
}

pub fn module(db: Arc<DbManager>) -> EventsModule {
    EventsModule::new(db, EventsConfig::default())
}

/// Insert an event the way admin tooling would; `age_secs` backdates creation.
pub async fn seed_event(
    db: &DbManager,
    slug: &str,
    registration_link: Option<&str>,
    age_secs: i64,
) -> Event {
    let handle = db.connect().await.unwrap();
    let created = Utc::now() - Duration::seconds(age_secs);
    let model = event::ActiveModel {
        id: Set(Uuid::new_v4()),
        slug: Set(slug.to_string()),
        title: Set(format!("Title of {slug}")),
        description: Set("A gathering of people who like things.".into()),
        overview: Set(Some("Short overview".into())),
        image: Set("/images/event.png".into()),
        venue: Set("Main Hall".into()),
        location: Set("Lisbon, Portugal".into()),
        date: Set("2025-07-14".into()),
        time: Set("10:00".into()),
        mode: Set("offline".into()),
        audience: Set("Developers".into()),
        organizer: Set("Eventbook".into()),
        registration_link: Set(registration_link.map(str::to_string)),
        created_at: Set(created),
        updated_at: Set(created),
    };
    model.insert(&handle.sea()).await.unwrap().into()
}

pub async fn booking_rows(db: &DbManager) -> Vec<booking::Model> {
    let handle = db.connect().await.unwrap();
    booking::Entity::find().all(&handle.sea()).await.unwrap()
}

pub async fn booking_count(db: &DbManager) -> u64 {
    let handle = db.connect().await.unwrap();
    booking::Entity::find().count(&handle.sea()).await.unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(router: &Router, uri: &str, body: String) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
