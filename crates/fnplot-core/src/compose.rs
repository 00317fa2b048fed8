// File: crates/fnplot-core/src/compose.rs
// Summary: Plot compositor; joins sampled curves, a viewport and a surface into one Frame.

use crate::curve::{SampledCurve, SamplePoint};
use crate::downsample::decimate_runs;
use crate::draw::{DrawCommand, Frame, TextAlign, TextBaseline};
use crate::geometry::{DevicePoint, DeviceRect, SurfaceSize};
use crate::grid::{TickKind, ViewportGrid};
use crate::pen::{Pen, PenAction};
use crate::scale::{CoordinateMapper, ScaleTransform};
use crate::theme::Theme;
use crate::types::{GRID_TARGET_LINES, LABEL_AXIS_CLEARANCE_PX, STROKE_MARGIN_PX};
use crate::view::Viewport;

pub const PLACEHOLDER_TEXT: &str = "No functions plotted. Add one above!";

const ARROW_LEN: f32 = 8.0;
const ARROW_HALF_WIDTH: f32 = 4.0;
const LEGEND_ORIGIN: (f32, f32) = (10.0, 10.0);
const LEGEND_LINE_HEIGHT: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    pub grid_target_lines: f64,
    pub stroke_margin_px: f32,
    pub curve_width: f32,
    pub grid_minor_width: f32,
    pub grid_major_width: f32,
    pub axis_width: f32,
    pub axis_font_size: f32,
    pub legend_font_size: f32,
    pub placeholder_font_size: f32,
    pub show_legend: bool,
    /// LTTB-decimate each continuous run above this many points.
    pub max_points_per_run: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            grid_target_lines: GRID_TARGET_LINES,
            stroke_margin_px: STROKE_MARGIN_PX,
            curve_width: 2.0,
            grid_minor_width: 0.2,
            grid_major_width: 0.5,
            axis_width: 1.0,
            axis_font_size: 10.0,
            legend_font_size: 14.0,
            placeholder_font_size: 20.0,
            show_legend: true,
            max_points_per_run: None,
        }
    }
}

/// Compose one frame. Curves are drawn and listed in the order given.
pub fn compose<'a>(
    curves: impl IntoIterator<Item = &'a SampledCurve>,
    viewport: &Viewport,
    surface: SurfaceSize,
    opts: &RenderOptions,
) -> Frame {
    let curves: Vec<&SampledCurve> = curves.into_iter().collect();
    let mut frame = Frame::new(surface);
    if surface.is_scaled() {
        frame.push(DrawCommand::Scale(surface.pixel_ratio));
    }
    frame.push(DrawCommand::Clear(opts.theme.background));

    if curves.is_empty() {
        frame.push(DrawCommand::SetFill(opts.theme.placeholder));
        frame.text(PLACEHOLDER_TEXT, surface.center(), opts.placeholder_font_size, TextAlign::Center, TextBaseline::Middle);
        return frame;
    }

    let mapper = CoordinateMapper::new(viewport, surface);
    let pen_bounds = surface.bounds().inflate(opts.stroke_margin_px);
    let mut actions = Vec::new();
    for curve in &curves {
        draw_curve(&mut frame, curve, &mapper, pen_bounds, opts, &mut actions);
    }

    let grid = ViewportGrid::plan(viewport, opts.grid_target_lines);
    draw_grid(&mut frame, &grid, viewport, &mapper, surface, opts);
    let axes = draw_axes(&mut frame, &mapper, surface, opts);
    draw_tick_labels(&mut frame, &grid, viewport, &mapper, surface, axes, opts);

    if opts.show_legend {
        draw_legend(&mut frame, &curves, opts);
    }
    frame
}

fn draw_curve(
    frame: &mut Frame,
    curve: &SampledCurve,
    mapper: &CoordinateMapper,
    bounds: DeviceRect,
    opts: &RenderOptions,
    actions: &mut Vec<PenAction>,
) {
    let decimated: Vec<SamplePoint>;
    let points = match opts.max_points_per_run {
        Some(max) => {
            decimated = decimate_runs(&curve.points, max);
            &decimated[..]
        }
        None => &curve.points[..],
    };

    actions.clear();
    let mut pen = Pen::new(bounds);
    for p in points {
        pen.step(mapper.to_device(p.point()), p.after_gap, actions);
    }
    pen.finish(actions);

    frame.stroke_style(curve.color, opts.curve_width);
    for action in actions.iter() {
        match *action {
            PenAction::MoveTo(p) => {
                frame.push(DrawCommand::BeginPath);
                frame.push(DrawCommand::MoveTo(p));
            }
            PenAction::LineTo(p) => frame.push(DrawCommand::LineTo(p)),
            PenAction::Lift(_) => frame.push(DrawCommand::Stroke),
        }
    }
}

fn draw_grid(
    frame: &mut Frame,
    grid: &ViewportGrid,
    viewport: &Viewport,
    mapper: &CoordinateMapper,
    surface: SurfaceSize,
    opts: &RenderOptions,
) {
    let xs = grid.x.ticks(viewport.x_min(), viewport.x_max());
    let ys = grid.y.ticks(viewport.y_min(), viewport.y_max());
    let layers = [
        (TickKind::Minor, opts.theme.grid_minor, opts.grid_minor_width),
        (TickKind::Major, opts.theme.grid_major, opts.grid_major_width),
    ];
    for (kind, color, width) in layers {
        frame.stroke_style(color, width);
        for t in xs.iter().filter(|t| t.kind == kind) {
            let px = mapper.to_device_x(t.value) as f32;
            frame.line(DevicePoint::new(px, 0.0), DevicePoint::new(px, surface.height));
        }
        for t in ys.iter().filter(|t| t.kind == kind) {
            let py = mapper.to_device_y(t.value) as f32;
            frame.line(DevicePoint::new(0.0, py), DevicePoint::new(surface.width, py));
        }
    }
}

/// Device positions of the visible axes: (row of y = 0, column of x = 0).
#[derive(Clone, Copy, Debug)]
struct AxisPositions {
    x_axis_row: Option<f32>,
    y_axis_col: Option<f32>,
}

fn draw_axes(frame: &mut Frame, mapper: &CoordinateMapper, surface: SurfaceSize, opts: &RenderOptions) -> AxisPositions {
    let (w, h) = (surface.width, surface.height);
    let row = mapper.to_device_y(0.0) as f32;
    let col = mapper.to_device_x(0.0) as f32;
    let x_axis_row = (0.0..=h).contains(&row).then_some(row);
    let y_axis_col = (0.0..=w).contains(&col).then_some(col);

    frame.stroke_style(opts.theme.axis_line, opts.axis_width);
    frame.push(DrawCommand::SetFill(opts.theme.axis_label));
    if let Some(y) = x_axis_row {
        frame.line(DevicePoint::new(0.0, y), DevicePoint::new(w, y));
        let tip = DevicePoint::new(w, y);
        frame.line(tip, DevicePoint::new(w - ARROW_LEN, y - ARROW_HALF_WIDTH));
        frame.line(tip, DevicePoint::new(w - ARROW_LEN, y + ARROW_HALF_WIDTH));
        let dy = if y > h - 20.0 { -15.0 } else { 15.0 };
        frame.text("X", DevicePoint::new(w - 15.0, y + dy), opts.axis_font_size, TextAlign::Left, TextBaseline::Middle);
    }
    if let Some(x) = y_axis_col {
        frame.line(DevicePoint::new(x, 0.0), DevicePoint::new(x, h));
        let tip = DevicePoint::new(x, 0.0);
        frame.line(tip, DevicePoint::new(x - ARROW_HALF_WIDTH, ARROW_LEN));
        frame.line(tip, DevicePoint::new(x + ARROW_HALF_WIDTH, ARROW_LEN));
        let dx = if x > w - 20.0 { -15.0 } else { 5.0 };
        frame.text("Y", DevicePoint::new(x + dx, 15.0), opts.axis_font_size, TextAlign::Left, TextBaseline::Middle);
    }
    AxisPositions { x_axis_row, y_axis_col }
}

fn draw_tick_labels(
    frame: &mut Frame,
    grid: &ViewportGrid,
    viewport: &Viewport,
    mapper: &CoordinateMapper,
    surface: SurfaceSize,
    axes: AxisPositions,
    opts: &RenderOptions,
) {
    let (w, h) = (surface.width, surface.height);
    let size = opts.axis_font_size;
    frame.push(DrawCommand::SetFill(opts.theme.axis_label));

    // labels hug the axis, or the nearest edge when the axis is off-screen
    let row = (mapper.to_device_y(0.0) as f32).clamp(0.0, h);
    let label_y = row + if row > h - 20.0 { -15.0 } else { 15.0 };
    for value in grid.x.major_ticks(viewport.x_min(), viewport.x_max()) {
        let px = mapper.to_device_x(value) as f32;
        if !(0.0..=w).contains(&px) || near(axes.y_axis_col, px) {
            continue;
        }
        let label = grid.x.format_label(value);
        frame.text(label, DevicePoint::new(px, label_y), size, TextAlign::Center, TextBaseline::Middle);
    }

    let col = (mapper.to_device_x(0.0) as f32).clamp(0.0, w);
    let label_x = col + if col > w - 20.0 { -30.0 } else { 5.0 };
    for value in grid.y.major_ticks(viewport.y_min(), viewport.y_max()) {
        let py = mapper.to_device_y(value) as f32;
        if !(0.0..=h).contains(&py) || near(axes.x_axis_row, py) {
            continue;
        }
        let label = grid.y.format_label(value);
        frame.text(label, DevicePoint::new(label_x, py), size, TextAlign::Left, TextBaseline::Middle);
    }
}

fn near(axis: Option<f32>, coord: f32) -> bool {
    axis.is_some_and(|a| (a - coord).abs() <= LABEL_AXIS_CLEARANCE_PX)
}

fn draw_legend(frame: &mut Frame, curves: &[&SampledCurve], opts: &RenderOptions) {
    let (x0, y0) = LEGEND_ORIGIN;
    for (i, curve) in curves.iter().enumerate() {
        frame.push(DrawCommand::SetFill(curve.color));
        let pos = DevicePoint::new(x0, y0 + i as f32 * LEGEND_LINE_HEIGHT);
        frame.text(legend_label(i, &curve.expression), pos, opts.legend_font_size, TextAlign::Left, TextBaseline::Top);
    }
}

/// `f{n}(x) = expr`, with `n` counting from 1.
pub fn legend_label(index: usize, expression: &str) -> String {
    format!("f{}(x) = {}", index + 1, expression)
}
