//! Learning-component metrics: dispatch outcomes, mapping failures, store size.

use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Learning-component metrics recorder
pub struct ComponentMetrics;

impl ComponentMetrics {
    // =========================================================================
    // Dispatch Metrics
    // =========================================================================

    /// Record a successful create/update call issued by a request builder
    pub fn record_dispatch_succeeded(kind: &str, operation: &str, duration_secs: f64) {
        counter!(
            "component_dispatch_total",
            "kind" => kind.to_string(),
            "operation" => operation.to_string(),
            "outcome" => "success"
        )
        .increment(1);
        histogram!(
            "component_dispatch_duration_seconds",
            "kind" => kind.to_string(),
            "operation" => operation.to_string()
        )
        .record(duration_secs);
    }

    /// Record a failed create/update call, labelled with the transport error kind
    pub fn record_dispatch_failed(kind: &str, operation: &str, error_kind: &str) {
        counter!(
            "component_dispatch_total",
            "kind" => kind.to_string(),
            "operation" => operation.to_string(),
            "outcome" => "failure",
            "error_kind" => error_kind.to_string()
        )
        .increment(1);

        tracing::debug!(
            kind = kind,
            operation = operation,
            error_kind = error_kind,
            "Component dispatch failed"
        );
    }

    /// Record an entity that no registered builder or mapper accepts
    pub fn record_unsupported(type_name: &str) {
        counter!("component_unsupported_total", "type" => type_name.to_string()).increment(1);
    }

    // =========================================================================
    // Mapping Metrics
    // =========================================================================

    /// Record a DTO that could not be decoded into an entity
    pub fn record_mapping_failed(kind: &str, reason: &str) {
        counter!(
            "component_mapping_failures_total",
            "kind" => kind.to_string(),
            "reason" => reason.to_string()
        )
        .increment(1);
    }

    // =========================================================================
    // Store Metrics
    // =========================================================================

    /// Record a server-side write (create, update, delete)
    pub fn record_stored(kind: &str, operation: &str) {
        counter!(
            "component_store_operations_total",
            "kind" => kind.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    /// Set the number of live (not soft-deleted) components of a kind
    pub fn set_live_components(kind: &str, count: usize) {
        gauge!("components_live", "kind" => kind.to_string()).set(count as f64);
    }
}

/// Measures one dispatch call. Records a success on [`DispatchTimer::succeed`]
/// or a failure on [`DispatchTimer::fail`]; dropping it unresolved records
/// a cancellation.
pub struct DispatchTimer {
    start: Instant,
    kind: &'static str,
    operation: &'static str,
    resolved: bool,
}

impl DispatchTimer {
    pub fn start(kind: &'static str, operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            kind,
            operation,
            resolved: false,
        }
    }

    /// Record success and return the elapsed time in milliseconds
    pub fn succeed(mut self) -> u64 {
        self.resolved = true;
        let elapsed = self.start.elapsed();
        ComponentMetrics::record_dispatch_succeeded(
            self.kind,
            self.operation,
            elapsed.as_secs_f64(),
        );
        elapsed.as_millis() as u64
    }

    pub fn fail(mut self, error_kind: &str) {
        self.resolved = true;
        ComponentMetrics::record_dispatch_failed(self.kind, self.operation, error_kind);
    }
}

impl Drop for DispatchTimer {
    fn drop(&mut self) {
        if !self.resolved {
            ComponentMetrics::record_dispatch_failed(self.kind, self.operation, "cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_a_noop() {
        ComponentMetrics::record_stored("projector", "create");
        ComponentMetrics::set_live_components("projector", 3);
        ComponentMetrics::record_mapping_failed("whiteboard", "missing_field");

        let timer = DispatchTimer::start("projector", "post");
        let _elapsed_ms = timer.succeed();
        DispatchTimer::start("whiteboard", "put").fail("not_found");
        drop(DispatchTimer::start("whiteboard", "post"));
    }
}
