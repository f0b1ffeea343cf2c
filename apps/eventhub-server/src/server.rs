//! HTTP host: global middleware stack, bind and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use modkit::api::auth::require_caller;
use modkit::api::request_id;
use modkit::{Caller, StaticTokenAuth};
use runtime::{AuthConfig, ServerConfig};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr> {
    let raw = format!("{}:{}", cfg.host, cfg.port);
    raw.parse()
        .with_context(|| format!("Invalid bind address '{raw}'"))
}

/// Token table from the `auth` section; `None` when the section is absent.
pub fn caller_auth(cfg: Option<&AuthConfig>) -> Result<Option<Arc<StaticTokenAuth>>> {
    let Some(cfg) = cfg else {
        return Ok(None);
    };
    let grants = cfg.tokens.iter().map(|(token, grant)| {
        (
            token.clone(),
            Caller {
                user_id: grant.user_id.clone(),
                role: grant.role.clone(),
            },
        )
    });
    let auth = StaticTokenAuth::new(grants).context("Invalid auth section")?;
    if auth.is_empty() {
        tracing::warn!("auth section has no tokens; every API request will be rejected");
    }
    Ok(Some(Arc::new(auth)))
}

/// Put module routes behind the caller gate. Routes added afterwards (`/health`) stay open.
pub fn protect(module_routes: Router, auth: Option<Arc<StaticTokenAuth>>) -> Router {
    match auth {
        Some(auth) => {
            tracing::info!(tokens = auth.len(), "API routes require a bearer token");
            module_routes.layer(from_fn_with_state(auth, require_caller))
        }
        None => {
            tracing::warn!("No auth section configured; API routes are open");
            module_routes
        }
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Wrap module routes with the global layers.
///
/// The last layer added is the outermost, so a request passes
/// SetRequestId -> PropagateRequestId -> Trace -> push_req_id -> Timeout -> BodyLimit.
pub fn build_router(module_routes: Router, cfg: &ServerConfig) -> Router {
    let x_request_id = request_id::header();

    let mut router = module_routes
        .route("/health", get(health_check))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    if cfg.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(cfg.timeout_sec)));
    }

    router
        .layer(from_fn(request_id::push_req_id_to_extensions))
        .layer(request_id::create_trace_layer())
        // echoes the id onto the response; must sit inside SetRequestId
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        // generates an id when the client sent none
        .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "shutdown signal listener failed");
            }
            tracing::info!("HTTP server shutting down gracefully");
        })
        .await
        .context("HTTP server failed")
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?; // Ctrl+C
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}
