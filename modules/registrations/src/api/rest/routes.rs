use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tracing::debug;

use crate::api::rest::handlers;
use crate::config::RegistrationsConfig;
use crate::domain::service::Service;

pub const REGISTRATIONS_PATH: &str = "/api/v1/registrations";
pub const LEGACY_CREATE_PATH: &str = "/api/v1/register/create";
pub const LEGACY_LIST_PATH: &str = "/api/v1/registers";

pub fn register_routes(
    mut router: Router,
    service: Arc<Service>,
    cfg: &RegistrationsConfig,
) -> anyhow::Result<Router> {
    // POST /api/v1/registrations - register a user for an event
    // GET  /api/v1/registrations - list registrations
    router = router.route(
        REGISTRATIONS_PATH,
        post(handlers::create_registration).get(handlers::list_registrations),
    );

    if cfg.legacy_routes {
        debug!("Mounting legacy registration routes");
        router = router
            .route(LEGACY_CREATE_PATH, post(handlers::create_registration))
            .route(LEGACY_LIST_PATH, get(handlers::list_registrations));
    }

    Ok(router.layer(Extension(service)))
}
