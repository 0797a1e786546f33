//! Catalog application library
//!
//! Wires the events and genres resources into the module registry and runs
//! them behind the HTTP server.

#![recursion_limit = "256"]

pub mod modules;

use anyhow::Context;
use axum::Router;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Registry holding every resource module
pub fn registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Router serving every resource, backed by fresh fixture data
pub fn router(settings: &Settings) -> Router {
    catalog_http::build_router(&registry(settings), settings)
}

/// Run the modules and the HTTP server until shutdown
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = catalog_http::start_server(&registry, &settings)
        .await
        .context("HTTP server stopped with an error");

    registry.stop_modules().await?;
    served
}
