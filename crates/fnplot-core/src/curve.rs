// File: crates/fnplot-core/src/curve.rs
// Summary: Curve model: identifiers, sample points, sampled curves and add requests.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Point;
use crate::sample::Domain;
use crate::theme::Color;

static CURVE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque curve identifier, normally unique per add request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(u64);

impl CurveId {
    /// Wrap a client-assigned identifier.
    pub const fn new(raw: u64) -> Self { Self(raw) }

    /// Draw a fresh identifier from a process-wide counter.
    pub fn next() -> Self {
        Self(CURVE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One surviving sample of a curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    /// Samples right before this one were excluded by the evaluator.
    pub after_gap: bool,
}

impl SamplePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, after_gap: false }
    }
    pub const fn after_gap(x: f64, y: f64) -> Self {
        Self { x, y, after_gap: true }
    }
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Result of one sampling request. Never mutated once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledCurve {
    pub id: CurveId,
    pub expression: String,
    pub color: Color,
    pub domain: Domain,
    pub points: Vec<SamplePoint>,
}

impl SampledCurve {
    /// Number of domain breaks inside the curve.
    pub fn gap_count(&self) -> usize {
        self.points.iter().skip(1).filter(|p| p.after_gap).count()
    }

    /// Split the points into continuous runs (no domain break inside a run).
    pub fn runs(&self) -> RunIter<'_> {
        runs(&self.points)
    }

    /// Y range over all points, `None` when empty.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.y))
    }

    /// Y range over points with `x` inside `[x_min, x_max]`.
    pub fn y_bounds_within(&self, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
        bounds(self.points.iter().filter(|p| p.x >= x_min && p.x <= x_max).map(|p| p.y))
    }

    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.x, self.points.last()?.x))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Iterator over continuous runs of a point slice.
pub struct RunIter<'a> {
    rest: &'a [SamplePoint],
}

impl<'a> Iterator for RunIter<'a> {
    type Item = &'a [SamplePoint];
    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self.rest.iter().skip(1).position(|p| p.after_gap).map_or(self.rest.len(), |i| i + 1);
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}

/// Split any point slice into continuous runs.
pub fn runs(points: &[SamplePoint]) -> RunIter<'_> {
    RunIter { rest: points }
}

/// What a caller submits to add (or re-sample) a curve.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveRequest {
    pub id: CurveId,
    pub expression: String,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub color: Color,
}

impl CurveRequest {
    /// Request with a fresh identifier.
    pub fn new(expression: impl Into<String>, start: f64, end: f64, step: f64, color: Color) -> Self {
        Self { id: CurveId::next(), expression: expression.into(), start, end, step, color }
    }

    pub fn with_id(mut self, id: CurveId) -> Self {
        self.id = id;
        self
    }
}
