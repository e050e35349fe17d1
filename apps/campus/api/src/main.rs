use axum::middleware;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_learning_components::{InMemoryComponentStore, MapperRegistry};
use observability::metrics_middleware;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);
    observability::init_metrics()?;

    let registry = MapperRegistry::global();
    registry.ensure_complete()?;

    let state = AppState { config, registry };

    let api_routes = api::routes(&state, InMemoryComponentStore::new());

    let router = create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.server.cors_allowed_origins,
    )?;

    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()))
        .merge(api::metrics_router())
        .layer(middleware::from_fn(metrics_middleware));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting campus API"
    );

    create_production_app(
        app,
        &state.config.server,
        state.config.shutdown_timeout,
        async move {
            info!("Shutting down: in-memory components are discarded");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Campus API shutdown complete");
    Ok(())
}
