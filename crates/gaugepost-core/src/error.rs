//! Shared error type across gaugePost crates.
//!
//! Every variant is process-fatal: the exporter is a batch-reconcile-then-serve
//! design with nothing transient to retry against.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, GaugePostError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum GaugePostError {
    /// Config file open/read/decode/validate failure.
    #[error("config: {0}")]
    Config(String),
    /// Metric or label name rejected by the exposition library.
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    /// Same metric name declared with incompatible label dimensions.
    #[error("schema conflict: {0}")]
    SchemaConflict(String),
    /// Registration or series lookup failure from the metrics registry.
    #[error("registry: {0}")]
    Registry(String),
    /// Listener address parse/bind/serve failure.
    #[error("listen: {0}")]
    Listen(String),
    /// Broken invariant; should be unreachable.
    #[error("internal: {0}")]
    Internal(String),
}
