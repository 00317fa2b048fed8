// File: crates/fnplot-core/src/grid.rs
// Summary: Adaptive grid planning ("nice numbers"), tick enumeration and label formatting.

use crate::view::Viewport;

const NICE_NUMBERS: [f64; 3] = [1.0, 2.0, 5.0];
const MINOR_DIVISIONS: f64 = 5.0;
/// Shortest decimal representations never need more than this.
const MAX_DECIMALS: usize = 17;

/// Grid spacing for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPlan {
    pub major_step: f64,
    pub minor_step: f64,
    pub decimal_places: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    Major,
    Minor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub kind: TickKind,
}

/// Plan grid lines for `[axis_min, axis_max]` aiming at about `target_lines` majors.
pub fn plan(axis_min: f64, axis_max: f64, target_lines: f64) -> GridPlan {
    let range = axis_max - axis_min;
    debug_assert!(range > 0.0 && range.is_finite(), "degenerate grid range {axis_min}..{axis_max}");
    let target = if target_lines.is_finite() && target_lines >= 1.0 { target_lines } else { 1.0 };
    if !(range > 0.0 && range.is_finite()) {
        return GridPlan::from_major(1.0);
    }
    GridPlan::from_major(nice_step(range, target))
}

/// Pick a step from {1, 2, 5} x 10^k for `range` split into about `target` parts.
pub fn nice_step(range: f64, target: f64) -> f64 {
    let exponent = (range / target).log10().floor() as i32;
    let fraction = scale_pow10(range, -exponent);
    let candidate = NICE_NUMBERS
        .iter()
        .copied()
        .find(|&c| fraction / c <= 10.0)
        .unwrap_or(1.0);
    scale_pow10(candidate, exponent)
}

/// `value * 10^exponent`, dividing by an exact power of ten for negative exponents.
fn scale_pow10(value: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        value * 10f64.powi(exponent)
    } else {
        value / 10f64.powi(-exponent)
    }
}

/// 0 for integral steps, else the significant fractional digits of `step`.
pub fn decimal_places(step: f64) -> usize {
    if !step.is_finite() || step.fract() == 0.0 {
        return 0;
    }
    // `Display` for f64 is the shortest round-tripping form and never uses exponents
    let repr = step.abs().to_string();
    repr.split_once('.').map_or(0, |(_, frac)| frac.len()).min(MAX_DECIMALS)
}

impl GridPlan {
    pub fn from_major(major_step: f64) -> Self {
        Self {
            major_step,
            minor_step: major_step / MINOR_DIVISIONS,
            decimal_places: decimal_places(major_step),
        }
    }

    /// Major when within half a minor step of a major multiple.
    pub fn classify(&self, value: f64) -> TickKind {
        let r = value.rem_euclid(self.major_step);
        let tol = self.minor_step * 0.5;
        if r < tol || self.major_step - r < tol { TickKind::Major } else { TickKind::Minor }
    }

    /// Every minor-step multiple in `[min, max]`, ascending.
    pub fn ticks(&self, min: f64, max: f64) -> Vec<Tick> {
        if !(min <= max) || !(self.minor_step > 0.0) {
            return Vec::new();
        }
        let first = (min / self.minor_step).ceil() as i64;
        let last = (max / self.minor_step).floor() as i64;
        (first..=last)
            .map(|k| {
                let value = k as f64 * self.minor_step;
                Tick { value, kind: self.classify(value) }
            })
            .collect()
    }

    /// Only the major ticks in `[min, max]`.
    pub fn major_ticks(&self, min: f64, max: f64) -> Vec<f64> {
        self.ticks(min, max)
            .into_iter()
            .filter(|t| t.kind == TickKind::Major)
            .map(|t| t.value)
            .collect()
    }

    /// Format a tick value with `decimal_places`, without a negative zero.
    pub fn format_label(&self, value: f64) -> String {
        let v = if value.abs() < self.minor_step * 1e-6 { 0.0 } else { value };
        let s = format!("{:.*}", self.decimal_places, v);
        if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
            s[1..].to_string()
        } else {
            s
        }
    }
}

/// Grid plans for both axes of a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportGrid {
    pub x: GridPlan,
    pub y: GridPlan,
}

impl ViewportGrid {
    pub fn plan(viewport: &Viewport, target_lines: f64) -> Self {
        Self {
            x: plan(viewport.x_min(), viewport.x_max(), target_lines),
            y: plan(viewport.y_min(), viewport.y_max(), target_lines),
        }
    }
}
