//! Readiness checks for the campus API.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Ready once every component kind has a mapper and metrics are recording.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "mapper_registry",
            Box::pin(async {
                state
                    .registry
                    .ensure_complete()
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "metrics",
            Box::pin(async {
                observability::get_metrics_handle()
                    .map(|_| ())
                    .ok_or_else(|| "Prometheus recorder not installed".to_string())
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
