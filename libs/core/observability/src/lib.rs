//! Observability utilities for the campus services.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Learning-component metrics (dispatch outcomes, mapping failures, store size)
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, ComponentMetrics};
//!
//! init_metrics()?;
//!
//! ComponentMetrics::record_stored("projector", "create");
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod components;
pub mod middleware;

pub use components::{ComponentMetrics, DispatchTimer};
pub use middleware::metrics_middleware;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder.
///
/// Call once at startup; later calls return the handle installed first.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_gauge;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Component metrics
    describe_counter!(
        "component_dispatch_total",
        "Create/update calls issued per component kind and outcome"
    );
    describe_histogram!(
        "component_dispatch_duration_seconds",
        "Duration of successful create/update calls"
    );
    describe_counter!(
        "component_unsupported_total",
        "Entities rejected because no builder or mapper is registered for them"
    );
    describe_counter!(
        "component_mapping_failures_total",
        "DTOs that failed to decode into entities"
    );
    describe_counter!(
        "component_store_operations_total",
        "Server-side component writes by kind and operation"
    );
    describe_gauge!("components_live", "Live components by kind");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_handler_renders_recorded_counters() {
        let handle = init_metrics().unwrap();
        assert!(std::ptr::eq(handle, init_metrics().unwrap()));

        ComponentMetrics::record_stored("whiteboard", "create");

        let body = metrics_handler().await;
        assert!(body.contains("component_store_operations_total"));
    }
}
