//! Tests for single-flight and caching behavior of DbManager.

use async_trait::async_trait;
use eventbook_db::{ConnectOpts, Connector, DbError, DbHandle, DbManager};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Counts attempts; optionally fails the first `fail_first` of them.
struct CountingConnector {
    attempts: AtomicUsize,
    fail_first: usize,
    delay: Duration,
}

impl CountingConnector {
    fn new(fail_first: usize) -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            fail_first,
            delay: Duration::from_millis(50),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for CountingConnector {
    async fn connect(&self, dsn: &str, opts: &ConnectOpts) -> eventbook_db::Result<DbHandle> {
        let n = self.attempts.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if n < self.fail_first {
            return Err(DbError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        DbHandle::connect(dsn, opts).await
    }
}

/// Blocks inside connect until released.
struct GatedConnector {
    attempts: AtomicUsize,
    gate: Arc<Notify>,
}

#[async_trait]
impl Connector for GatedConnector {
    async fn connect(&self, dsn: &str, opts: &ConnectOpts) -> eventbook_db::Result<DbHandle> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        DbHandle::connect(dsn, opts).await
    }
}

fn memory_opts() -> ConnectOpts {
    ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    }
}

fn manager_with(connector: Arc<dyn Connector>) -> Arc<DbManager> {
    Arc::new(DbManager::with_connector(
        Some("sqlite::memory:".into()),
        memory_opts(),
        connector,
    ))
}

/// Two concurrent connect() calls before the first resolves: one attempt, same handle.
#[tokio::test]
async fn test_concurrent_connect_single_attempt() {
    let connector = Arc::new(CountingConnector::new(0));
    let manager = manager_with(connector.clone());

    let m1 = manager.clone();
    let m2 = manager.clone();
    let (r1, r2) = tokio::join!(m1.connect(), m2.connect());

    let h1 = r1.expect("first caller should connect");
    let h2 = r2.expect("second caller should connect");
    assert!(Arc::ptr_eq(&h1, &h2), "both callers must share one handle");
    assert_eq!(connector.attempts(), 1, "exactly one underlying attempt");
}

#[tokio::test]
async fn test_many_spawned_callers_share_attempt() {
    let gate = Arc::new(Notify::new());
    let connector = Arc::new(GatedConnector {
        attempts: AtomicUsize::new(0),
        gate: gate.clone(),
    });
    let manager = manager_with(connector.clone());

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let m = manager.clone();
        tasks.push(tokio::spawn(async move { m.connect().await }));
    }

    // Let every task reach the in-flight attempt before releasing it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    gate.notify_one();

    let mut handles = Vec::new();
    for t in tasks {
        handles.push(t.await.unwrap().expect("connect should succeed"));
    }
    assert_eq!(connector.attempts.load(Ordering::SeqCst), 1);
    assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn test_cached_handle_is_reused() {
    let connector = Arc::new(CountingConnector::new(0));
    let manager = manager_with(connector.clone());

    assert!(manager.cached().is_none());
    let h1 = manager.connect().await.unwrap();
    let h2 = manager.connect().await.unwrap();

    assert!(Arc::ptr_eq(&h1, &h2));
    assert!(manager.cached().is_some());
    assert_eq!(connector.attempts(), 1);
}

/// A failed attempt reaches every waiter and the next call retries.
#[tokio::test]
async fn test_failed_attempt_is_shared_then_retried() {
    let connector = Arc::new(CountingConnector::new(1));
    let manager = manager_with(connector.clone());

    let m1 = manager.clone();
    let m2 = manager.clone();
    let (r1, r2) = tokio::join!(m1.connect(), m2.connect());

    let e1 = r1.expect_err("first waiter sees the failure");
    let e2 = r2.expect_err("second waiter sees the failure");
    assert!(e1.to_string().contains("connection refused"));
    assert_eq!(e1.to_string(), e2.to_string());
    assert_eq!(connector.attempts(), 1);
    assert!(manager.cached().is_none());

    let handle = manager.connect().await.expect("retry should succeed");
    assert_eq!(connector.attempts(), 2, "a new attempt must be started");
    assert!(Arc::ptr_eq(&handle, &manager.connect().await.unwrap()));
}

#[tokio::test]
async fn test_missing_dsn_fails_without_attempt() {
    let connector = Arc::new(CountingConnector::new(0));
    let manager = DbManager::with_connector(None, memory_opts(), connector.clone());

    assert!(!manager.is_configured());
    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, DbError::MissingDsn));
    assert!(err.is_config());
    assert_eq!(connector.attempts(), 0);
}

#[tokio::test]
async fn test_blank_dsn_counts_as_missing() {
    let manager = DbManager::new(Some("   ".into()), memory_opts());
    assert!(matches!(
        manager.connect().await.unwrap_err(),
        DbError::MissingDsn
    ));
}

#[tokio::test]
async fn test_unknown_scheme_is_config_error() {
    let manager = DbManager::new(Some("mongodb://localhost/events".into()), memory_opts());
    let err = manager.connect().await.unwrap_err();
    assert!(err.is_config());
    assert!(manager.cached().is_none());
}

#[tokio::test]
async fn test_close_resets_cache() {
    let connector = Arc::new(CountingConnector::new(0));
    let manager = manager_with(connector.clone());

    let first = manager.connect().await.unwrap();
    manager.close().await;
    assert!(manager.cached().is_none());

    let second = manager.connect().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(connector.attempts(), 2);
}

/// close() while an attempt is in flight: the late handle is not handed out or cached.
#[tokio::test]
async fn test_close_during_connect_abandons_attempt() {
    let gate = Arc::new(Notify::new());
    let connector = Arc::new(GatedConnector {
        attempts: AtomicUsize::new(0),
        gate: gate.clone(),
    });
    let manager = manager_with(connector.clone());

    let m = manager.clone();
    let pending = tokio::spawn(async move { m.connect().await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    manager.close().await;
    gate.notify_one();

    let err = pending.await.unwrap().expect_err("abandoned attempt must fail");
    assert!(matches!(err, DbError::Closed));
    assert!(!err.is_config());
    assert!(manager.cached().is_none());

    // A fresh attempt after teardown works normally.
    gate.notify_one();
    let handle = manager.connect().await.expect("reconnect after close");
    assert!(Arc::ptr_eq(&handle, &manager.cached().unwrap()));
    assert_eq!(connector.attempts.load(Ordering::SeqCst), 2);
}
