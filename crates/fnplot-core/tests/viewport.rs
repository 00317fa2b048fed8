// File: crates/fnplot-core/tests/viewport.rs
// Purpose: Viewport transforms: zoom/pan round trips, reset, include_x and fitting.

use fnplot_core::types::MIN_SPAN;
use fnplot_core::{
    Color, CoordinateMapper, CurveId, Domain, PanDirection, PlotError, SampledCurve, SamplePoint, ScaleTransform, SurfaceSize,
    Viewport, ViewportGrid,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

fn approx_view(a: &Viewport, b: &Viewport) -> bool {
    approx(a.x_min(), b.x_min()) && approx(a.x_max(), b.x_max()) && approx(a.y_min(), b.y_min()) && approx(a.y_max(), b.y_max())
}

fn curve(points: &[(f64, f64)]) -> SampledCurve {
    SampledCurve {
        id: CurveId::new(1),
        expression: "data".into(),
        color: Color::from_rgb(0, 0, 0),
        domain: Domain::new(-100.0, 100.0, 1.0).unwrap(),
        points: points.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect(),
    }
}

#[test]
fn default_is_symmetric_ten() {
    let v = Viewport::default();
    assert_eq!((v.x_min(), v.x_max(), v.y_min(), v.y_max()), (-10.0, 10.0, -10.0, 10.0));
}

#[test]
fn zoom_scales_around_center() {
    let v = Viewport::new(0.0, 10.0, -2.0, 2.0).unwrap();
    let z = v.zoom(0.5);
    assert!(approx(z.x_min(), 2.5) && approx(z.x_max(), 7.5));
    assert!(approx(z.y_min(), -1.0) && approx(z.y_max(), 1.0));
    assert_eq!(z.center(), v.center());
}

#[test]
fn zoom_in_then_out_round_trips() {
    let v = Viewport::new(-3.0, 17.0, 0.5, 9.5).unwrap();
    for &k in &[0.8, 1.25, 0.1, 3.0] {
        assert!(approx_view(&v.zoom(k).zoom(1.0 / k), &v), "factor {k}");
    }
}

#[test]
fn zoom_rejects_bad_factors() {
    let v = Viewport::default();
    for f in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(v.zoom(f), v);
    }
}

#[test]
fn pan_round_trips_and_keeps_spans() {
    let v = Viewport::new(-4.0, 6.0, -1.0, 3.0).unwrap();
    let pairs = [(PanDirection::Left, PanDirection::Right), (PanDirection::Up, PanDirection::Down)];
    for (a, b) in pairs {
        let moved = v.pan(a, 0.1);
        assert!(approx(moved.x_span(), v.x_span()) && approx(moved.y_span(), v.y_span()));
        assert!(approx_view(&moved.pan(b, 0.1), &v));
    }
}

#[test]
fn pan_up_reveals_larger_y() {
    let v = Viewport::default();
    let up = v.pan(PanDirection::Up, 0.1);
    assert!(approx(up.y_min(), -8.0) && approx(up.y_max(), 12.0));
    let left = v.pan(PanDirection::Left, 0.1);
    assert!(approx(left.x_min(), -12.0) && approx(left.x_max(), 8.0));
}

#[test]
fn reset_restores_default() {
    let v = Viewport::default().zoom(0.3).pan(PanDirection::Right, 0.4);
    assert_eq!(v.reset(), Viewport::default());
}

#[test]
fn include_x_only_widens() {
    let v = Viewport::default();
    let wide = v.include_x(-50.0, 3.0);
    assert_eq!((wide.x_min(), wide.x_max()), (-50.0, 10.0));
    assert_eq!((wide.y_min(), wide.y_max()), (v.y_min(), v.y_max()));
    assert_eq!(v.include_x(-1.0, 1.0), v);
}

#[test]
fn invalid_viewport_is_rejected() {
    assert!(matches!(Viewport::new(1.0, 1.0, 0.0, 1.0), Err(PlotError::ViewportInvariantViolation { .. })));
    assert!(Viewport::new(0.0, f64::NAN, 0.0, 1.0).is_err());
    assert!(Viewport::new(0.0, 1.0, 2.0, 1.0).is_err());
}

#[test]
fn fit_frames_all_points_with_margin() {
    let c = curve(&[(-2.0, 0.0), (0.0, 10.0), (4.0, 5.0)]);
    let v = Viewport::default().fit([&c]);
    assert_eq!((v.x_min(), v.x_max()), (-2.0, 4.0));
    assert!(approx(v.y_min(), -0.2) && approx(v.y_max(), 10.2));
}

#[test]
fn fit_y_visible_uses_only_visible_points() {
    let c = curve(&[(-50.0, 1000.0), (-1.0, -3.0), (1.0, 5.0), (50.0, -1000.0)]);
    let v = Viewport::default().fit_y_visible([&c]);
    assert_eq!((v.x_min(), v.x_max()), (-10.0, 10.0));
    assert!(approx(v.y_min(), -3.16) && approx(v.y_max(), 5.16));
}

#[test]
fn fit_without_points_is_a_no_op() {
    let c = curve(&[]);
    let v = Viewport::default();
    assert_eq!(v.fit([&c]), v);
    assert_eq!(v.fit_y_visible([&c]), v);
}

#[test]
fn zoom_stops_before_span_underflows() {
    let v = Viewport::default();
    assert_eq!(v.zoom(1e-320), v);
    assert!(matches!(Viewport::new(0.0, 1e-310, 0.0, 1.0), Err(PlotError::ViewportInvariantViolation { .. })));
    assert!(Viewport::new(0.0, MIN_SPAN, 0.0, 1.0).is_ok());
}

#[test]
fn deepest_zoom_still_maps_and_plans() {
    let mut v = Viewport::default();
    for _ in 0..200 {
        v = v.zoom(0.01);
    }
    assert!(v.x_span() >= MIN_SPAN && v.y_span() >= MIN_SPAN);

    let grid = ViewportGrid::plan(&v, 5.0);
    assert!(grid.x.major_step > 0.0 && grid.x.major_step.is_normal());
    assert!(grid.y.major_step > 0.0 && grid.y.major_step.is_normal());

    let m = CoordinateMapper::new(&v, SurfaceSize::default());
    assert!(m.scale_x().is_finite() && m.scale_y().is_finite());
    let (cx, _) = v.center();
    let back = m.to_data_x(m.to_device_x(cx));
    assert!(back.is_finite());
    assert!((back - cx).abs() <= v.x_span() * 1e-6);
}
