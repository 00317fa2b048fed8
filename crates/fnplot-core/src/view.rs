// File: crates/fnplot-core/src/view.rs
// First-class view state: the visible data rectangle and pure pan/zoom/reset/fit transforms.

use crate::curve::SampledCurve;
use crate::error::PlotError;
use crate::types::{DEFAULT_EXTENT, MIN_SPAN};

/// Pan direction in screen terms. `Up` reveals larger y values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Visible rectangle in data space.
/// Contract: finite bounds, `x_max > x_min`, `y_max > y_min`. Every transform
/// either keeps the contract or returns the viewport unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Viewport {
    pub const DEFAULT: Self = Self {
        x_min: -DEFAULT_EXTENT,
        x_max: DEFAULT_EXTENT,
        y_min: -DEFAULT_EXTENT,
        y_max: DEFAULT_EXTENT,
    };

    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, PlotError> {
        Self::checked(x_min, x_max, y_min, y_max)
            .ok_or(PlotError::ViewportInvariantViolation { x_min, x_max, y_min, y_max })
    }

    fn checked(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Option<Self> {
        let finite = x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite();
        // spans must stay representable after the subtraction and wide enough to map onto pixels
        let ok = finite && span_ok(x_max - x_min) && span_ok(y_max - y_min);
        ok.then_some(Self { x_min, x_max, y_min, y_max })
    }

    pub fn x_min(&self) -> f64 { self.x_min }
    pub fn x_max(&self) -> f64 { self.x_max }
    pub fn y_min(&self) -> f64 { self.y_min }
    pub fn y_max(&self) -> f64 { self.y_max }
    pub fn x_span(&self) -> f64 { self.x_max - self.x_min }
    pub fn y_span(&self) -> f64 { self.y_max - self.y_min }

    pub fn center(&self) -> (f64, f64) {
        ((self.x_min + self.x_max) * 0.5, (self.y_min + self.y_max) * 0.5)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Scale both extents around the center. `factor < 1` zooms in.
    pub fn zoom(&self, factor: f64) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return *self;
        }
        let (cx, cy) = self.center();
        let hx = self.x_span() * factor * 0.5;
        let hy = self.y_span() * factor * 0.5;
        Self::checked(cx - hx, cx + hx, cy - hy, cy + hy).unwrap_or(*self)
    }

    /// Shift by `fraction` of the current extent along one axis.
    pub fn pan(&self, direction: PanDirection, fraction: f64) -> Self {
        if !fraction.is_finite() {
            return *self;
        }
        let dx = self.x_span() * fraction;
        let dy = self.y_span() * fraction;
        let (x_min, x_max, y_min, y_max) = match direction {
            PanDirection::Left => (self.x_min - dx, self.x_max - dx, self.y_min, self.y_max),
            PanDirection::Right => (self.x_min + dx, self.x_max + dx, self.y_min, self.y_max),
            PanDirection::Up => (self.x_min, self.x_max, self.y_min + dy, self.y_max + dy),
            PanDirection::Down => (self.x_min, self.x_max, self.y_min - dy, self.y_max - dy),
        };
        Self::checked(x_min, x_max, y_min, y_max).unwrap_or(*self)
    }

    /// Back to the default extent.
    pub fn reset(&self) -> Self {
        Self::DEFAULT
    }

    /// Widen (never narrow) the X extent to cover `[min, max]`; Y is left alone.
    pub fn include_x(&self, min: f64, max: f64) -> Self {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return *self;
        }
        Self::checked(self.x_min.min(min), self.x_max.max(max), self.y_min, self.y_max).unwrap_or(*self)
    }

    /// Frame every sampled point of `curves`, with a 2% vertical margin.
    pub fn fit<'a>(&self, curves: impl IntoIterator<Item = &'a SampledCurve>) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for c in curves {
            for p in &c.points {
                x_min = x_min.min(p.x);
                x_max = x_max.max(p.x);
                y_min = y_min.min(p.y);
                y_max = y_max.max(p.y);
            }
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return *self;
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let ym = (y_max - y_min) * 0.02;
        Self::checked(x_min, x_max, y_min - ym, y_max + ym).unwrap_or(*self)
    }

    /// Rescale Y to the points visible in the current X window.
    pub fn fit_y_visible<'a>(&self, curves: impl IntoIterator<Item = &'a SampledCurve>) -> Self {
        let range = curves
            .into_iter()
            .filter_map(|c| c.y_bounds_within(self.x_min, self.x_max))
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)));
        let Some((mut y_min, mut y_max)) = range else { return *self };
        if (y_max - y_min).abs() < 1e-9 { y_min -= 0.5; y_max += 0.5; }
        let m = (y_max - y_min) * 0.02;
        Self::checked(self.x_min, self.x_max, y_min - m, y_max + m).unwrap_or(*self)
    }
}

fn span_ok(span: f64) -> bool {
    span.is_finite() && span >= MIN_SPAN
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}
