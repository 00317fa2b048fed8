// File: crates/fnplot-core/src/error.rs
// Summary: Error taxonomy for sampling requests, viewport construction and saved-function storage.

use thiserror::Error;

use crate::curve::CurveId;

/// Why a sampling domain was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DomainIssue {
    #[error("range bounds must be finite (start = {start}, end = {end}, step = {step})")]
    NonFinite { start: f64, end: f64, step: f64 },
    #[error("range start {start} must be less than range end {end}")]
    StartNotBeforeEnd { start: f64, end: f64 },
    #[error("step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("{requested:.0} steps exceed the limit of {limit}")]
    TooManySamples { requested: f64, limit: usize },
}

/// Per-request failures. A failed request never touches curves plotted earlier.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PlotError {
    #[error("invalid domain: {0}")]
    InvalidDomain(#[from] DomainIssue),
    #[error("invalid expression `{expression}`: {message}")]
    InvalidExpression { expression: String, message: String },
    #[error("sampling for curve {0} was cancelled")]
    Cancelled(CurveId),
    /// Internal only: the view transforms never produce this.
    #[error("viewport [{x_min}, {x_max}] x [{y_min}, {y_max}] is empty or non-finite")]
    ViewportInvariantViolation { x_min: f64, x_max: f64, y_min: f64, y_max: f64 },
}

/// Failures reported by a [`FunctionStore`](crate::store::FunctionStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("saved function {0} not found")]
    NotFound(u64),
    #[error("saved function is incomplete: {0}")]
    Incomplete(&'static str),
    #[error("storage backend failed")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}
