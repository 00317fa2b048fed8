// File: crates/fnplot-core/tests/compose.rs
// Purpose: Frame composition: placeholder, pixel ratio, stroke breaking, grid, labels and legend.

use fnplot_core::{
    compose, Color, CurveId, DrawCommand, Domain, Frame, RenderOptions, SampledCurve, SamplePoint, SurfaceSize, Viewport,
    PLACEHOLDER_TEXT,
};

const RED: Color = Color::from_rgb(255, 0, 0);
const BLUE: Color = Color::from_rgb(0, 0, 255);

fn curve(id: u64, expression: &str, color: Color, points: Vec<SamplePoint>) -> SampledCurve {
    SampledCurve {
        id: CurveId::new(id),
        expression: expression.into(),
        color,
        domain: Domain::new(-100.0, 100.0, 0.1).unwrap(),
        points,
    }
}

fn line_points() -> Vec<SamplePoint> {
    (-20..=20).map(|i| SamplePoint::new(i as f64 * 0.5, i as f64 * 0.25)).collect()
}

fn strokes_in(frame: &Frame, color: Color) -> usize {
    frame.polylines().iter().filter(|(c, _)| *c == color).count()
}

#[test]
fn empty_chart_shows_only_placeholder() {
    let opts = RenderOptions::default();
    let frame = compose(std::iter::empty::<&SampledCurve>(), &Viewport::default(), SurfaceSize::new(400.0, 300.0), &opts);
    let texts: Vec<&str> = frame.texts().collect();
    assert_eq!(texts, vec![PLACEHOLDER_TEXT]);
    assert!(matches!(frame.commands[0], DrawCommand::Clear(c) if c == opts.theme.background));
    assert!(frame.polylines().is_empty(), "no grid or axes without curves");
    let centered = frame.commands.iter().any(|c| match c {
        DrawCommand::FillText { position, .. } => position.x == 200.0 && position.y == 150.0,
        _ => false,
    });
    assert!(centered);
}

#[test]
fn pixel_ratio_scale_comes_first() {
    let opts = RenderOptions::default();
    let c = curve(1, "x/2", RED, line_points());
    let frame = compose([&c], &Viewport::default(), SurfaceSize::with_pixel_ratio(300.0, 200.0, 2.0), &opts);
    assert_eq!(frame.commands[0], DrawCommand::Scale(2.0));
    assert!(matches!(frame.commands[1], DrawCommand::Clear(_)));

    let plain = compose([&c], &Viewport::default(), SurfaceSize::new(300.0, 200.0), &opts);
    assert!(!plain.commands.iter().any(|c| matches!(c, DrawCommand::Scale(_))));
}

#[test]
fn continuous_visible_curve_is_one_stroke() {
    let c = curve(1, "x/2", RED, line_points());
    let frame = compose([&c], &Viewport::default(), SurfaceSize::default(), &RenderOptions::default());
    let strokes: Vec<_> = frame.polylines().into_iter().filter(|(col, _)| *col == RED).collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].1.len(), 41);
}

#[test]
fn domain_gap_splits_stroke() {
    let mut pts = line_points();
    // drop x = 0 and mark the next point
    pts.remove(20);
    pts[20].after_gap = true;
    let c = curve(1, "1/x", RED, pts);
    let frame = compose([&c], &Viewport::default(), SurfaceSize::default(), &RenderOptions::default());
    assert_eq!(strokes_in(&frame, RED), 2);
}

#[test]
fn far_off_screen_points_split_stroke() {
    let pts = vec![
        SamplePoint::new(-5.0, 1.0),
        SamplePoint::new(-4.0, 2.0),
        SamplePoint::new(0.0, 1e6),
        SamplePoint::new(4.0, 2.0),
        SamplePoint::new(5.0, 1.0),
    ];
    let c = curve(1, "spike", RED, pts);
    let frame = compose([&c], &Viewport::default(), SurfaceSize::default(), &RenderOptions::default());
    let strokes: Vec<_> = frame.polylines().into_iter().filter(|(col, _)| *col == RED).collect();
    assert_eq!(strokes.len(), 2);
    assert!(strokes.iter().all(|(_, pts)| pts.len() == 2));
}

#[test]
fn legend_follows_submission_order() {
    let a = curve(9, "sin(x)", RED, line_points());
    let b = curve(2, "x^2", BLUE, line_points());
    let frame = compose([&a, &b], &Viewport::default(), SurfaceSize::default(), &RenderOptions::default());
    let legend: Vec<&str> = frame.texts().filter(|t| t.starts_with('f')).collect();
    assert_eq!(legend, vec!["f1(x) = sin(x)", "f2(x) = x^2"]);
    // legend entries are drawn after everything else
    let last_two: Vec<_> = frame.texts().rev().take(2).collect();
    assert_eq!(last_two, vec!["f2(x) = x^2", "f1(x) = sin(x)"]);
}

#[test]
fn legend_can_be_hidden() {
    let opts = RenderOptions { show_legend: false, ..RenderOptions::default() };
    let a = curve(1, "x", RED, line_points());
    let frame = compose([&a], &Viewport::default(), SurfaceSize::default(), &opts);
    assert!(!frame.texts().any(|t| t.starts_with("f1")));
}

#[test]
fn curves_come_before_grid_and_axes() {
    let opts = RenderOptions::default();
    let c = curve(1, "x/2", RED, line_points());
    let frame = compose([&c], &Viewport::default(), SurfaceSize::default(), &opts);
    let first_stroke_color = frame.commands.iter().find_map(|c| match c {
        DrawCommand::SetStroke { color, .. } => Some(*color),
        _ => None,
    });
    assert_eq!(first_stroke_color, Some(RED));
    assert!(strokes_in(&frame, opts.theme.grid_major) > 0);
    assert!(strokes_in(&frame, opts.theme.axis_line) >= 2);
}

#[test]
fn tick_labels_skip_the_axes() {
    let c = curve(1, "x/2", RED, line_points());
    let frame = compose([&c], &Viewport::default(), SurfaceSize::default(), &RenderOptions::default());
    let texts: Vec<&str> = frame.texts().collect();
    for label in ["-8", "-4", "2", "8"] {
        assert!(texts.contains(&label), "missing {label} in {texts:?}");
    }
    // zero sits on both axes
    assert!(!texts.contains(&"0"));
    assert!(texts.contains(&"X") && texts.contains(&"Y"));
}

#[test]
fn axes_hidden_when_origin_off_screen() {
    let opts = RenderOptions::default();
    let c = curve(1, "x/2", RED, line_points());
    let view = Viewport::new(20.0, 40.0, 20.0, 40.0).unwrap();
    let frame = compose([&c], &view, SurfaceSize::default(), &opts);
    assert_eq!(strokes_in(&frame, opts.theme.axis_line), 0);
    // labels still appear, clamped to the surface edge
    assert!(frame.texts().any(|t| t == "24"));
}

#[test]
fn decimation_caps_points_per_run() {
    let dense: Vec<SamplePoint> = (0..=2000).map(|i| {
        let x = -10.0 + i as f64 * 0.01;
        SamplePoint::new(x, x.sin())
    }).collect();
    let c = curve(1, "sin(x)", RED, dense);
    let opts = RenderOptions { max_points_per_run: Some(200), ..RenderOptions::default() };
    let frame = compose([&c], &Viewport::default(), SurfaceSize::default(), &opts);
    let strokes: Vec<_> = frame.polylines().into_iter().filter(|(col, _)| *col == RED).collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].1.len(), 200);
}
