use std::sync::Arc;

use axum::Router;
use eventbook_db::{DbHandle, DbManager};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::{rest, ui};
use crate::config::EventsConfig;
use crate::contract::client::EventsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::EventsLocalClient;
use crate::infra::storage::migrations::Migrator;

/// Wiring of the events module: domain service, local client and routes.
#[derive(Clone)]
pub struct EventsModule {
    service: Arc<Service>,
    client: Arc<dyn EventsApi>,
}

impl EventsModule {
    /// Does not connect; the first operation does.
    pub fn new(db: Arc<DbManager>, cfg: EventsConfig) -> Self {
        info!("Initializing events module (list_limit={})", cfg.list_limit);

        let service = Arc::new(Service::new(
            db,
            ServiceConfig {
                list_limit: cfg.list_limit,
            },
        ));
        let client: Arc<dyn EventsApi> = Arc::new(EventsLocalClient::new(service.clone()));
        Self { service, client }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process API for other modules.
    pub fn client(&self) -> Arc<dyn EventsApi> {
        self.client.clone()
    }

    /// JSON and HTML routes of the module.
    pub fn router(&self) -> Router {
        info!("Registering events routes");
        let router = rest::routes::register_routes(Router::new(), self.service.clone());
        ui::routes::register_routes(router, self.service.clone(), self.client.clone())
    }

    /// Apply pending schema migrations.
    pub async fn migrate(db: &DbHandle) -> anyhow::Result<()> {
        info!("Running events database migrations");
        Migrator::up(&db.sea(), None).await?;
        info!("Events database migrations completed successfully");
        Ok(())
    }
}
