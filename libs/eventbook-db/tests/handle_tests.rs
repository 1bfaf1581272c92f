//! Tests for DbHandle connectivity on SQLite.

use eventbook_db::{ConnectOpts, DbEngine, DbHandle, DbManager};
use sea_orm::{ConnectionTrait, Statement};
use tempfile::TempDir;

#[tokio::test]
async fn test_connect_sqlite_memory() {
    let opts = ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    };
    let db = DbHandle::connect("sqlite::memory:", &opts).await.unwrap();
    assert_eq!(db.engine(), DbEngine::Sqlite);
    assert!(db.sqlx_sqlite().is_some());

    let conn = db.sea();
    let row = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            "SELECT 1 AS one",
        ))
        .await
        .unwrap()
        .expect("one row");
    let one: i32 = row.try_get("", "one").unwrap();
    assert_eq!(one, 1);
    db.close().await;
}

#[tokio::test]
async fn test_connect_sqlite_file_creates_database() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data/eventbook.db");
    let dsn = format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"));

    let manager = DbManager::new(Some(dsn), ConnectOpts::default());
    let db = manager.connect().await.unwrap();
    assert_eq!(db.engine(), DbEngine::Sqlite);
    assert!(path.exists(), "database file should be created");
    manager.close().await;
}

#[tokio::test]
async fn test_foreign_keys_enabled_on_sqlite() {
    let opts = ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    };
    let db = DbHandle::connect("sqlite::memory:", &opts).await.unwrap();
    let conn = db.sea();
    let row = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            "PRAGMA foreign_keys",
        ))
        .await
        .unwrap()
        .expect("pragma row");
    let on: i32 = row.try_get_by_index(0).unwrap();
    assert_eq!(on, 1);
}
