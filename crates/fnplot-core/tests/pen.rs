// File: crates/fnplot-core/tests/pen.rs
// Purpose: Pen state machine transitions and stroke breaking.

use fnplot_core::pen::trace;
use fnplot_core::{DevicePoint, DeviceRect, LiftReason, Pen, PenAction, PenState};

fn bounds() -> DeviceRect {
    DeviceRect::from_ltwh(0.0, 0.0, 100.0, 100.0)
}

fn p(x: f32, y: f32) -> DevicePoint {
    DevicePoint::new(x, y)
}

#[test]
fn starts_lifted_and_moves_on_first_inside_point() {
    let mut pen = Pen::new(bounds());
    let mut out = Vec::new();
    assert_eq!(pen.state(), PenState::Lifted);
    pen.step(p(10.0, 10.0), false, &mut out);
    assert_eq!(pen.state(), PenState::Drawing);
    assert_eq!(out, vec![PenAction::MoveTo(p(10.0, 10.0))]);
}

#[test]
fn outside_points_while_lifted_emit_nothing() {
    let actions = trace(bounds(), [(p(-50.0, 0.0), false), (p(500.0, 0.0), false)]);
    assert!(actions.is_empty());
}

#[test]
fn leaving_bounds_lifts_then_reentry_moves() {
    let actions = trace(
        bounds(),
        [(p(10.0, 10.0), false), (p(20.0, 20.0), false), (p(20.0, 900.0), false), (p(30.0, 30.0), false)],
    );
    assert_eq!(
        actions,
        vec![
            PenAction::MoveTo(p(10.0, 10.0)),
            PenAction::LineTo(p(20.0, 20.0)),
            PenAction::Lift(LiftReason::OffScreen),
            PenAction::MoveTo(p(30.0, 30.0)),
            PenAction::Lift(LiftReason::End),
        ]
    );
}

#[test]
fn domain_gap_breaks_even_inside_bounds() {
    let actions = trace(bounds(), [(p(10.0, 10.0), false), (p(20.0, 20.0), false), (p(30.0, 30.0), true)]);
    assert_eq!(
        actions,
        vec![
            PenAction::MoveTo(p(10.0, 10.0)),
            PenAction::LineTo(p(20.0, 20.0)),
            PenAction::Lift(LiftReason::DomainGap),
            PenAction::MoveTo(p(30.0, 30.0)),
            PenAction::Lift(LiftReason::End),
        ]
    );
}

#[test]
fn boundary_points_count_as_inside() {
    let actions = trace(bounds(), [(p(0.0, 0.0), false), (p(100.0, 100.0), false)]);
    assert_eq!(actions.len(), 3);
    assert!(matches!(actions[1], PenAction::LineTo(_)));
}

#[test]
fn finish_on_lifted_pen_is_silent() {
    let mut pen = Pen::new(bounds());
    let mut out = Vec::new();
    pen.finish(&mut out);
    assert!(out.is_empty());
}
