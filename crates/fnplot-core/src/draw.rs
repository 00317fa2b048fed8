// File: crates/fnplot-core/src/draw.rs
// Summary: Backend-agnostic draw commands; a Frame is one rendered pass over a surface.

use crate::geometry::{DevicePoint, SurfaceSize};
use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

/// Canvas-style primitives in logical pixels. `Scale` applies to everything after it.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Scale(f32),
    Clear(Color),
    SetStroke { color: Color, width: f32 },
    SetFill(Color),
    BeginPath,
    MoveTo(DevicePoint),
    LineTo(DevicePoint),
    Stroke,
    FillText {
        text: String,
        position: DevicePoint,
        size: f32,
        align: TextAlign,
        baseline: TextBaseline,
    },
}

/// Output of one composition pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub surface: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(surface: SurfaceSize) -> Self {
        Self { surface, commands: Vec::new() }
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn stroke_style(&mut self, color: Color, width: f32) {
        self.push(DrawCommand::SetStroke { color, width });
    }

    /// A single straight stroked line with the current stroke style.
    pub fn line(&mut self, from: DevicePoint, to: DevicePoint) {
        self.commands.extend([
            DrawCommand::BeginPath,
            DrawCommand::MoveTo(from),
            DrawCommand::LineTo(to),
            DrawCommand::Stroke,
        ]);
    }

    pub fn text(&mut self, text: impl Into<String>, position: DevicePoint, size: f32, align: TextAlign, baseline: TextBaseline) {
        self.push(DrawCommand::FillText { text: text.into(), position, size, align, baseline });
    }

    /// All text drawn in this frame, in order.
    pub fn texts(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Group path commands into stroked polylines with the stroke color active at the time.
    pub fn polylines(&self) -> Vec<(Color, Vec<DevicePoint>)> {
        let mut out = Vec::new();
        let mut color = Color::from_rgb(0, 0, 0);
        let mut current: Vec<DevicePoint> = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::SetStroke { color: c, .. } => color = *c,
                DrawCommand::BeginPath => current.clear(),
                DrawCommand::MoveTo(p) | DrawCommand::LineTo(p) => current.push(*p),
                DrawCommand::Stroke => {
                    if !current.is_empty() {
                        out.push((color, std::mem::take(&mut current)));
                    }
                }
                _ => {}
            }
        }
        out
    }
}
