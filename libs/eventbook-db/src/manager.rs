//! Process-wide database connection cache.
//!
//! The DbManager is responsible for:
//! - Holding the configured DSN and pool options (the DSN is validated lazily, on `connect`)
//! - Running at most one connect attempt at a time and sharing it with every concurrent caller
//! - Caching the resulting handle until `close`
//! - Forgetting a failed attempt so that the next call starts a fresh one

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::{redact_credentials_in_dsn, ConnectOpts, DbError, DbHandle, Result};

/// Physical connect step used by [`DbManager`].
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, dsn: &str, opts: &ConnectOpts) -> Result<DbHandle>;
}

/// Default connector: builds an sqlx pool and the SeaORM connection on top of it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlxConnector;

#[async_trait]
impl Connector for SqlxConnector {
    async fn connect(&self, dsn: &str, opts: &ConnectOpts) -> Result<DbHandle> {
        DbHandle::connect(dsn, opts).await
    }
}

type ConnectAttempt = Shared<BoxFuture<'static, std::result::Result<Arc<DbHandle>, Arc<DbError>>>>;

enum Slot {
    Idle,
    Connecting { id: u64, attempt: ConnectAttempt },
    Ready(Arc<DbHandle>),
}

/// Lazily connected, single-flight database handle cache.
pub struct DbManager {
    dsn: Option<String>,
    opts: ConnectOpts,
    connector: Arc<dyn Connector>,
    slot: Mutex<Slot>,
    next_attempt: AtomicU64,
    // attempts with an id below this were started before the last `close`
    closed_before: AtomicU64,
}

impl DbManager {
    /// Create a manager backed by [`SqlxConnector`].
    ///
    /// A missing DSN is accepted here and reported by [`DbManager::connect`].
    pub fn new(dsn: Option<String>, opts: ConnectOpts) -> Self {
        Self::with_connector(dsn, opts, Arc::new(SqlxConnector))
    }

    pub fn with_connector(
        dsn: Option<String>,
        opts: ConnectOpts,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let dsn = dsn.filter(|d| !d.trim().is_empty());
        Self {
            dsn,
            opts,
            connector,
            slot: Mutex::new(Slot::Idle),
            next_attempt: AtomicU64::new(1),
            closed_before: AtomicU64::new(0),
        }
    }

    /// True when a DSN was configured.
    pub fn is_configured(&self) -> bool {
        self.dsn.is_some()
    }

    /// Return the cached handle, joining or starting a connect attempt when there is none.
    pub async fn connect(&self) -> Result<Arc<DbHandle>> {
        let dsn = self.dsn.as_deref().ok_or(DbError::MissingDsn)?;

        let (id, attempt) = {
            let mut slot = self.slot.lock();
            let in_flight = match &*slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Connecting { id, attempt } => Some((*id, attempt.clone())),
                Slot::Idle => None,
            };
            match in_flight {
                Some((id, attempt)) => {
                    tracing::debug!(attempt = id, "Joining in-flight database connect");
                    (id, attempt)
                }
                None => {
                    let id = self.next_attempt.fetch_add(1, Ordering::SeqCst);
                    let attempt = self.start_attempt(id, dsn.to_string());
                    *slot = Slot::Connecting {
                        id,
                        attempt: attempt.clone(),
                    };
                    (id, attempt)
                }
            }
        };

        let outcome = attempt.await;

        // Only the attempt that still owns the slot may settle it.
        {
            let mut slot = self.slot.lock();
            if matches!(&*slot, Slot::Connecting { id: current, .. } if *current == id) {
                *slot = match &outcome {
                    Ok(handle) => Slot::Ready(handle.clone()),
                    Err(_) => Slot::Idle,
                };
            }
        }

        let handle = outcome.map_err(DbError::Attempt)?;
        if id < self.closed_before.load(Ordering::SeqCst) {
            // Torn down while connecting: nobody else will close this pool.
            tracing::info!(attempt = id, "Closing database pool opened after shutdown");
            handle.close().await;
            return Err(DbError::Closed);
        }
        Ok(handle)
    }

    /// The cached handle, if a connect attempt already succeeded.
    pub fn cached(&self) -> Option<Arc<DbHandle>> {
        match &*self.slot.lock() {
            Slot::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Drop the cached handle and close its pool.
    ///
    /// An attempt still in flight is abandoned: its pool is closed when it
    /// finishes and its waiters get [`DbError::Closed`].
    pub async fn close(&self) {
        let previous = {
            let mut slot = self.slot.lock();
            self.closed_before.store(
                self.next_attempt.load(Ordering::SeqCst),
                Ordering::SeqCst,
            );
            std::mem::replace(&mut *slot, Slot::Idle)
        };
        match previous {
            Slot::Ready(handle) => {
                tracing::info!("Closing database pool");
                handle.close().await;
            }
            Slot::Connecting { id, .. } => {
                tracing::info!(attempt = id, "Abandoning in-flight database connect");
            }
            Slot::Idle => {}
        }
    }

    fn start_attempt(&self, id: u64, dsn: String) -> ConnectAttempt {
        let connector = self.connector.clone();
        let opts = self.opts.clone();
        async move {
            let redacted = redact_credentials_in_dsn(Some(&dsn));
            tracing::info!(attempt = id, dsn = %redacted, "Connecting to database");
            match connector.connect(&dsn, &opts).await {
                Ok(handle) => {
                    tracing::info!(
                        attempt = id,
                        engine = ?handle.engine(),
                        dsn = %redacted,
                        "Connected to database"
                    );
                    Ok(Arc::new(handle))
                }
                Err(e) => {
                    tracing::error!(attempt = id, dsn = %redacted, error = %e, "Database connect failed");
                    Err(Arc::new(e))
                }
            }
        }
        .boxed()
        .shared()
    }
}
