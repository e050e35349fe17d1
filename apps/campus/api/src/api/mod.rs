use axum::{Router, routing::get};
use domain_learning_components::{
    ComponentStore, LearningComponentService, handlers as components,
};
use observability::metrics_handler;

use crate::state::AppState;

pub mod health;

/// Routes served under `/api`
pub fn routes<S: ComponentStore + 'static>(state: &AppState, store: S) -> Router {
    let service = LearningComponentService::with_registry(store, state.registry.clone());

    Router::new().merge(components::router(service))
}

pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}
