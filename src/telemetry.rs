//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `prasat_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status` — outcome: "ok" or "error"
//! - `error` — [`PrasatError::kind`](crate::PrasatError::kind) on failure
//! - `label` — predicted temple label

/// Total classification requests.
///
/// Labels: `status` ("ok" | "error"), `error` (error kind, "none" on success).
pub const CLASSIFICATIONS_TOTAL: &str = "prasat_classifications_total";

/// End-to-end classification duration in seconds (decode → decision).
pub const CLASSIFICATION_DURATION_SECONDS: &str = "prasat_classification_duration_seconds";

/// Model inference duration in seconds.
pub const INFERENCE_DURATION_SECONDS: &str = "prasat_inference_duration_seconds";

/// Total predictions per winning label.
///
/// Labels: `label`.
pub const PREDICTIONS_TOTAL: &str = "prasat_predictions_total";
