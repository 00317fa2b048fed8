// File: crates/fnplot-core/src/pen.rs
// Summary: Two-state pen deciding where a curve stroke starts, continues and breaks.

use crate::geometry::{DevicePoint, DeviceRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenState {
    Lifted,
    Drawing,
}

/// Why an open stroke was flushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiftReason {
    /// The next point left the margin around the surface.
    OffScreen,
    /// The evaluator excluded samples between two points.
    DomainGap,
    /// The curve ran out of points.
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PenAction {
    MoveTo(DevicePoint),
    LineTo(DevicePoint),
    Lift(LiftReason),
}

/// Stroke state machine for one curve in one render pass.
#[derive(Clone, Copy, Debug)]
pub struct Pen {
    state: PenState,
    bounds: DeviceRect,
}

impl Pen {
    /// `bounds` is the surface already inflated by the stroke margin.
    pub fn new(bounds: DeviceRect) -> Self {
        Self { state: PenState::Lifted, bounds }
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    /// Feed the next mapped point; actions are appended to `out`.
    pub fn step(&mut self, point: DevicePoint, after_gap: bool, out: &mut Vec<PenAction>) {
        if after_gap && self.state == PenState::Drawing {
            out.push(PenAction::Lift(LiftReason::DomainGap));
            self.state = PenState::Lifted;
        }
        let inside = self.bounds.contains(point);
        match (self.state, inside) {
            (PenState::Lifted, true) => {
                out.push(PenAction::MoveTo(point));
                self.state = PenState::Drawing;
            }
            (PenState::Drawing, true) => out.push(PenAction::LineTo(point)),
            (PenState::Drawing, false) => {
                out.push(PenAction::Lift(LiftReason::OffScreen));
                self.state = PenState::Lifted;
            }
            (PenState::Lifted, false) => {}
        }
    }

    /// Close any open stroke at the end of the curve.
    pub fn finish(&mut self, out: &mut Vec<PenAction>) {
        if self.state == PenState::Drawing {
            out.push(PenAction::Lift(LiftReason::End));
            self.state = PenState::Lifted;
        }
    }
}

/// Run a whole sequence of `(point, after_gap)` through a fresh pen.
pub fn trace(bounds: DeviceRect, points: impl IntoIterator<Item = (DevicePoint, bool)>) -> Vec<PenAction> {
    let mut pen = Pen::new(bounds);
    let mut out = Vec::new();
    for (p, gap) in points {
        pen.step(p, gap, &mut out);
    }
    pen.finish(&mut out);
    out
}
