// File: crates/fnplot-core/src/svg.rs
// Summary: Serialize a Frame into a standalone SVG document.

use std::fmt::Write as _;

use crate::draw::{DrawCommand, Frame, TextAlign, TextBaseline};
use crate::theme::Color;

impl Frame {
    /// SVG text sized to the physical surface, drawn in logical units via `viewBox`.
    pub fn to_svg(&self) -> String {
        let s = self.surface;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            s.physical_width(),
            s.physical_height(),
            s.width,
            s.height
        );

        let mut stroke = (Color::from_rgb(0, 0, 0), 1.0f32);
        let mut fill = Color::from_rgb(0, 0, 0);
        let mut path = String::new();
        for cmd in &self.commands {
            match cmd {
                // the viewBox already maps logical units onto physical pixels
                DrawCommand::Scale(_) => {}
                DrawCommand::Clear(c) => {
                    let _ = writeln!(out, r#"<rect width="100%" height="100%" {}/>"#, paint_attr("fill", *c));
                }
                DrawCommand::SetStroke { color, width } => stroke = (*color, *width),
                DrawCommand::SetFill(c) => fill = *c,
                DrawCommand::BeginPath => path.clear(),
                DrawCommand::MoveTo(p) => {
                    let _ = write!(path, "M{:.2} {:.2}", p.x, p.y);
                }
                DrawCommand::LineTo(p) => {
                    let _ = write!(path, "L{:.2} {:.2}", p.x, p.y);
                }
                DrawCommand::Stroke => {
                    if !path.is_empty() {
                        let _ = writeln!(
                            out,
                            r#"<path d="{}" fill="none" {} stroke-width="{}" stroke-linejoin="round"/>"#,
                            path,
                            paint_attr("stroke", stroke.0),
                            stroke.1
                        );
                    }
                    path.clear();
                }
                DrawCommand::FillText { text, position, size, align, baseline } => {
                    let anchor = match align {
                        TextAlign::Left => "start",
                        TextAlign::Center => "middle",
                        TextAlign::Right => "end",
                    };
                    let dominant = match baseline {
                        TextBaseline::Top => "hanging",
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                    };
                    let _ = writeln!(
                        out,
                        r#"<text x="{:.2}" y="{:.2}" font-family="Segoe UI, Arial, sans-serif" font-size="{}" text-anchor="{}" dominant-baseline="{}" {}>{}</text>"#,
                        position.x,
                        position.y,
                        size,
                        anchor,
                        dominant,
                        paint_attr("fill", fill),
                        escape(text)
                    );
                }
            }
        }
        out.push_str("</svg>\n");
        out
    }
}

fn paint_attr(name: &str, c: Color) -> String {
    if c.a == 255 {
        format!(r##"{name}="#{:02x}{:02x}{:02x}""##, c.r, c.g, c.b)
    } else {
        format!(
            r##"{name}="#{:02x}{:02x}{:02x}" {name}-opacity="{:.3}""##,
            c.r,
            c.g,
            c.b,
            c.a as f32 / 255.0
        )
    }
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            _ => s.push(ch),
        }
    }
    s
}
