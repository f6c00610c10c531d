//! Prometheus metrics for the gateway.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    pub const AUTH_REJECTIONS_TOTAL: &str = "v2m_auth_rejections_total";
    pub const JOBS_ENQUEUED_TOTAL: &str = "v2m_jobs_enqueued_total";
    pub const ORPHANED_UPLOADS_TOTAL: &str = "v2m_orphaned_uploads_total";
}

/// Record an auth rejection. The HTTP response folds every reason into 401,
/// so the per-reason split lives here.
pub fn record_auth_rejection(reason: &'static str) {
    counter!(names::AUTH_REJECTIONS_TOTAL, "reason" => reason).increment(1);
}

/// Record a successfully enqueued transcode job.
pub fn record_job_enqueued() {
    counter!(names::JOBS_ENQUEUED_TOTAL).increment(1);
}

/// Record a stored-but-not-queued upload (orphaned blob).
pub fn record_orphaned_upload() {
    counter!(names::ORPHANED_UPLOADS_TOTAL).increment(1);
}
