// File: crates/fnplot-core/src/eval.rs
// Summary: Expression evaluator seam. Parsing and evaluation live outside this crate.

use thiserror::Error;

/// Outcome of a failed evaluation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// The expression itself is unusable (syntax error, unknown identifier).
    #[error("{0}")]
    Invalid(String),
    /// The expression is fine but has no real value at this point.
    #[error("undefined at x = {x}: {reason}")]
    Undefined { x: f64, reason: String },
}

impl EvalError {
    pub fn undefined(x: f64, reason: impl Into<String>) -> Self {
        Self::Undefined { x, reason: reason.into() }
    }
}

/// Evaluates `expression` with the free variable `x` bound.
///
/// Implementations must be deterministic and side-effect free, and must not
/// treat the expression as anything beyond arithmetic over `x`.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, f64) -> Result<f64, EvalError> + Send + Sync,
{
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError> {
        self(expression, x)
    }
}
