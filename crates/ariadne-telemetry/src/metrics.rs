//! Route and job metrics.
//!
//! Counters are recorded through the `metrics` facade; installing a recorder
//! (Prometheus or otherwise) is up to the embedding process. Without one,
//! recording is a no-op.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `ariadne_route_matches_total` | Counter | `resource`, `action` | Requests matched to a route |
//! | `ariadne_route_misses_total` | Counter | - | Requests no route matched |
//! | `ariadne_params_missing_total` | Counter | `param` | Required parameters that were absent |
//! | `ariadne_jobs_enqueued_total` | Counter | `job` | Jobs handed off to a queue |

use metrics::{counter, describe_counter};

/// Route match counter name.
pub const ROUTE_MATCHES: &str = "ariadne_route_matches_total";

/// Route miss counter name.
pub const ROUTE_MISSES: &str = "ariadne_route_misses_total";

/// Missing required parameter counter name.
pub const PARAMS_MISSING: &str = "ariadne_params_missing_total";

/// Enqueued job counter name.
pub const JOBS_ENQUEUED: &str = "ariadne_jobs_enqueued_total";

/// Registers descriptions for all standard metrics.
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    describe_counter!(ROUTE_MATCHES, "Total number of requests matched to a route");
    describe_counter!(ROUTE_MISSES, "Total number of requests no route matched");
    describe_counter!(PARAMS_MISSING, "Total number of missing required parameters");
    describe_counter!(JOBS_ENQUEUED, "Total number of jobs handed off to a queue");
}

/// Records a matched route.
pub fn record_route_match(resource: &str, action: &str) {
    counter!(
        ROUTE_MATCHES,
        "resource" => resource.to_string(),
        "action" => action.to_string()
    )
    .increment(1);
}

/// Records a request no route matched.
pub fn record_route_miss() {
    counter!(ROUTE_MISSES).increment(1);
}

/// Records a missing required parameter (`prefix.field`).
pub fn record_missing_param(param: &str) {
    counter!(PARAMS_MISSING, "param" => param.to_string()).increment(1);
}

/// Records a job handed off to a queue.
pub fn record_job_enqueued(job: &str) {
    counter!(JOBS_ENQUEUED, "job" => job.to_string()).increment(1);
}
