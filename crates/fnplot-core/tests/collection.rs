// File: crates/fnplot-core/tests/collection.rs
// Purpose: Concurrent sampling: merge guard, stale results after removal, snapshot isolation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fnplot_core::{
    Chart, Color, CurveCollection, CurveId, CurveRequest, Domain, EvalError, PlotError, SampledCurve, SamplePoint,
};

const C0: Color = Color::from_rgb(1, 2, 3);

fn sampled(id: CurveId, expression: &str) -> SampledCurve {
    SampledCurve {
        id,
        expression: expression.into(),
        color: C0,
        domain: Domain::new(0.0, 1.0, 0.5).unwrap(),
        points: vec![SamplePoint::new(0.0, 0.0), SamplePoint::new(1.0, 1.0)],
    }
}

/// Evaluator that blocks until `gate` opens.
fn gated(gate: Arc<AtomicBool>) -> impl Fn(&str, f64) -> Result<f64, EvalError> + Send + Sync + 'static {
    move |_: &str, x: f64| {
        while !gate.load(Ordering::Acquire) {
            std::thread::sleep(Duration::from_millis(1));
        }
        Ok(x)
    }
}

#[test]
fn stale_ticket_cannot_commit() {
    let coll = CurveCollection::new();
    let id = CurveId::new(1);
    let old = coll.reserve(id);
    let new = coll.reserve(id);
    assert!(old.cancel_token().is_cancelled(), "superseded job is told to stop");

    assert!(!coll.commit(&old, sampled(id, "old")));
    assert!(coll.commit(&new, sampled(id, "new")));
    assert_eq!(coll.get(id).map(|c| c.expression.clone()), Some("new".into()));
    // a ticket is spent once committed
    assert!(!coll.commit(&new, sampled(id, "again")));
}

#[test]
fn removed_id_rejects_late_commit() {
    let coll = CurveCollection::new();
    let id = CurveId::new(2);
    let ticket = coll.reserve(id);
    assert!(coll.remove(id));
    assert!(ticket.cancel_token().is_cancelled());
    assert!(!coll.commit(&ticket, sampled(id, "late")));
    assert!(coll.is_empty());
}

#[test]
fn abandon_drops_only_the_reservation() {
    let coll = CurveCollection::new();
    let fresh = CurveId::new(3);
    let t = coll.reserve(fresh);
    coll.abandon(&t);
    assert!(coll.snapshot().ids().is_empty());

    let kept = CurveId::new(4);
    let t = coll.reserve(kept);
    assert!(coll.commit(&t, sampled(kept, "x")));
    let retry = coll.reserve(kept);
    coll.abandon(&retry);
    assert_eq!(coll.snapshot().ids(), &[kept]);
    assert!(coll.get(kept).is_some());
}

#[test]
fn snapshots_are_isolated_from_later_writes() {
    let coll = CurveCollection::new();
    let a = CurveId::new(5);
    let t = coll.reserve(a);
    coll.commit(&t, sampled(a, "x"));
    let before = coll.snapshot();
    coll.clear();
    assert_eq!(before.len(), 1);
    assert!(coll.is_empty());
}

#[test]
fn submission_order_is_fixed_at_reservation() {
    let coll = CurveCollection::new();
    let (a, b) = (CurveId::new(10), CurveId::new(11));
    let ta = coll.reserve(a);
    let tb = coll.reserve(b);
    // b finishes first
    coll.commit(&tb, sampled(b, "b"));
    coll.commit(&ta, sampled(a, "a"));
    let order: Vec<_> = coll.curves().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn removing_while_sampling_discards_result() {
    let gate = Arc::new(AtomicBool::new(false));
    let chart = Chart::new(gated(Arc::clone(&gate)));
    let pending = chart.spawn_curve(CurveRequest::new("x", -1.0, 1.0, 0.1, C0)).unwrap();
    let id = pending.id();
    assert!(chart.is_pending(id));

    assert!(chart.remove_curve(id));
    gate.store(true, Ordering::Release);
    assert_eq!(pending.join(), Err(PlotError::Cancelled(id)));
    assert!(chart.curves().is_empty());
    assert!(!chart.is_pending(id));
}

#[test]
fn spawned_curve_merges_when_done() {
    let gate = Arc::new(AtomicBool::new(true));
    let chart = Chart::new(gated(gate));
    let first = chart.spawn_curve(CurveRequest::new("x", -1.0, 1.0, 0.5, C0)).unwrap();
    let second = chart.spawn_curve(CurveRequest::new("x", -30.0, 30.0, 0.5, C0)).unwrap();
    let (a, b) = (first.join().unwrap(), second.join().unwrap());
    let ids: Vec<_> = chart.curves().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(chart.viewport().x_min(), -30.0);
}

#[test]
fn newer_request_for_same_id_wins() {
    let gate = Arc::new(AtomicBool::new(false));
    let chart = Chart::new(gated(Arc::clone(&gate)));
    let id = CurveId::next();
    let old = chart.spawn_curve(CurveRequest::new("old", -1.0, 1.0, 0.5, C0).with_id(id)).unwrap();
    let new = chart.spawn_curve(CurveRequest::new("new", -1.0, 1.0, 0.5, C0).with_id(id)).unwrap();
    gate.store(true, Ordering::Release);
    assert_eq!(old.join(), Err(PlotError::Cancelled(id)));
    assert_eq!(new.join(), Ok(id));
    assert_eq!(chart.curve(id).map(|c| c.expression.clone()), Some("new".into()));
}

#[test]
fn invalid_domain_is_reported_before_spawning() {
    let chart = Chart::new(gated(Arc::new(AtomicBool::new(false))));
    let err = chart.spawn_curve(CurveRequest::new("x", 1.0, 0.0, 0.1, C0)).err();
    assert!(matches!(err, Some(PlotError::InvalidDomain(_))));
}
