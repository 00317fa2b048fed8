// File: crates/fnplot-core/src/sample.rs
// Summary: Domain validation and bounded sampling of a scalar expression.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::curve::{CurveId, SamplePoint};
use crate::error::{DomainIssue, PlotError};
use crate::eval::{EvalError, Evaluator};
use crate::types::MAX_SAMPLES;

/// How often (in samples) the cancel token is polled.
const CANCEL_POLL_INTERVAL: usize = 256;

/// Sampling range for one curve.
/// Contract: finite bounds, `start < end`, `step > 0`, `(end - start) / step <= limit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    start: f64,
    end: f64,
    step: f64,
}

impl Domain {
    /// Validate against the default [`MAX_SAMPLES`] cap.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, PlotError> {
        Self::with_limit(start, end, step, MAX_SAMPLES)
    }

    pub fn with_limit(start: f64, end: f64, step: f64, max_samples: usize) -> Result<Self, PlotError> {
        if !start.is_finite() || !end.is_finite() || !step.is_finite() {
            return Err(DomainIssue::NonFinite { start, end, step }.into());
        }
        if start >= end {
            return Err(DomainIssue::StartNotBeforeEnd { start, end }.into());
        }
        if step <= 0.0 {
            return Err(DomainIssue::NonPositiveStep(step).into());
        }
        let requested = (end - start) / step;
        if !requested.is_finite() || requested > max_samples as f64 {
            return Err(DomainIssue::TooManySamples { requested, limit: max_samples }.into());
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> f64 { self.start }
    pub fn end(&self) -> f64 { self.end }
    pub fn step(&self) -> f64 { self.step }

    /// Nominal sample count, `(end - start) / step + 1`.
    pub fn nominal_len(&self) -> f64 {
        (self.end - self.start) / self.step + 1.0
    }

    /// The x values visited by the sampler, in increasing order.
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        // admit an endpoint that misses by float round-off
        let limit = self.end + self.step * 1e-9;
        (0u64..)
            .map(move |i| self.start + i as f64 * self.step)
            .take_while(move |&x| x <= limit)
            .map(move |x| x.min(self.end))
    }
}

/// Shared flag used to abandon an in-flight sampling job.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::Release); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Acquire) }
}

/// Sample `expression` over `domain`, omitting points with no finite value.
pub fn sample<E>(evaluator: &E, expression: &str, domain: &Domain) -> Result<Vec<SamplePoint>, PlotError>
where
    E: Evaluator + ?Sized,
{
    sample_inner(evaluator, expression, domain, None)
}

/// Like [`sample`], but gives up with [`PlotError::Cancelled`] once `cancel` fires.
pub fn sample_with_cancel<E>(
    evaluator: &E,
    expression: &str,
    domain: &Domain,
    id: CurveId,
    cancel: &CancelToken,
) -> Result<Vec<SamplePoint>, PlotError>
where
    E: Evaluator + ?Sized,
{
    sample_inner(evaluator, expression, domain, Some((id, cancel)))
}

fn sample_inner<E>(
    evaluator: &E,
    expression: &str,
    domain: &Domain,
    cancel: Option<(CurveId, &CancelToken)>,
) -> Result<Vec<SamplePoint>, PlotError>
where
    E: Evaluator + ?Sized,
{
    // Evaluate the first x once so a broken expression is reported as such, not as an empty curve.
    if let Err(EvalError::Invalid(message)) = evaluator.evaluate(expression, domain.start()) {
        return Err(PlotError::InvalidExpression { expression: expression.to_string(), message });
    }

    let mut points = Vec::with_capacity(domain.nominal_len().ceil() as usize + 1);
    let mut pending_gap = false;
    let mut excluded = 0usize;
    for (i, x) in domain.xs().enumerate() {
        if let Some((id, token)) = cancel {
            if i % CANCEL_POLL_INTERVAL == 0 && token.is_cancelled() {
                debug!(curve = %id, visited = i, "sampling cancelled");
                return Err(PlotError::Cancelled(id));
            }
        }
        match evaluator.evaluate(expression, x) {
            Ok(y) if y.is_finite() => {
                let after_gap = pending_gap && !points.is_empty();
                points.push(SamplePoint { x, y, after_gap });
                pending_gap = false;
            }
            _ => {
                excluded += 1;
                pending_gap = true;
            }
        }
    }

    debug!(expression, kept = points.len(), excluded, "sampled expression");
    Ok(points)
}
