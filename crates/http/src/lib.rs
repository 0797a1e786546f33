//! HTTP server facade for catalog with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use tokio::signal;

use catalog_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod openapi;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server and serve until a shutdown signal arrives
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let app = build_router(registry, settings);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!(
        "HTTP server listening on http://{}{}",
        address,
        settings.server.base_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server shutdown complete");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let base_path = settings.server.base_path.as_str();

    tracing::info!(
        modules = registry.module_count(),
        expose_reset = settings.server.expose_reset,
        "building router"
    );

    let mut api = Router::new();
    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under {}",
            base_path
        );
        api = api.merge(module.routes());
    }

    if settings.server.expose_reset {
        api = api.merge(reset_routes(registry.clone()));
    }

    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .mount_api(base_path, api)
        .with_openapi(openapi::document(registry, &settings.server))
        .with_fallback()
        .with_timeout(settings.server.request_timeout_ms)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .build()
}

/// Join a base path and a route path without doubling slashes
pub fn join_path(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else {
        format!("{}/{}", base, path)
    }
}

fn reset_routes(registry: ModuleRegistry) -> Router {
    Router::new()
        .route("/reset", get(reset))
        .with_state(registry)
}

/// Restore every module to its fixture data
async fn reset(State(registry): State<ModuleRegistry>) -> Json<serde_json::Value> {
    registry.reset_modules().await;
    Json(json!({ "message": "state reset" }))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
