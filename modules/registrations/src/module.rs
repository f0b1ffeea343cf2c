use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use async_trait::async_trait;
use modkit::{DbModule, Module, ModuleCtx, RestfulModule};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::RegistrationsConfig;
use crate::contract::client::RegistrationsApi;
use crate::domain::service::Service;
use crate::gateways::local::RegistrationsLocalClient;
use crate::infra::storage::sea_orm_repo::SeaOrmRegistrationsRepository;

pub const MODULE_NAME: &str = "registrations";

/// Registrations module: owns the `registrations` table and the routes under `/api/v1`.
///
/// Lifecycle: `init` (wiring) → `migrate` → `register_rest`.
#[derive(Default)]
pub struct Registrations {
    config: ArcSwap<RegistrationsConfig>,
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: ArcSwapOption<Service>,
}

impl Registrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// In-process client; available after `init`.
    pub fn client(&self) -> anyhow::Result<Arc<dyn RegistrationsApi>> {
        let service = self.service()?;
        Ok(Arc::new(RegistrationsLocalClient::new(service)))
    }

    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }
}

#[async_trait]
impl Module for Registrations {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing registrations module");

        let cfg: RegistrationsConfig = ctx.module_config()?;
        debug!(legacy_routes = cfg.legacy_routes, "Loaded registrations config");
        self.config.store(Arc::new(cfg));

        // DatabaseConnection is a cheap cloneable pool handle
        let db_conn = ctx.db_required()?.sea();

        // Wire repository (infra) to domain service (port)
        let repo = SeaOrmRegistrationsRepository::new(db_conn);
        let service = Service::new(Arc::new(repo));
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }
}

#[async_trait]
impl DbModule for Registrations {
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()> {
        info!("Running registrations database migrations");
        let conn = db.sea();
        crate::infra::storage::migrations::Migrator::up(&conn, None).await?;
        info!("Registrations database migrations completed successfully");
        Ok(())
    }
}

impl RestfulModule for Registrations {
    fn register_rest(&self, _ctx: &ModuleCtx, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering registrations REST routes");

        let service = self.service()?;
        let cfg = self.config.load();
        let router = routes::register_routes(router, service, &cfg)?;
        info!("Registrations REST routes registered successfully");
        Ok(router)
    }
}
