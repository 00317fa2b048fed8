// File: crates/fnplot-render-skia/src/lib.rs
// Summary: Replays a composed Frame onto a CPU raster surface and encodes PNG or RGBA output.

use anyhow::{anyhow, Context, Result};
use fnplot_core::{Color, DrawCommand, Frame};
use skia_safe as skia;
use tracing::debug;

pub mod text;

pub use text::TextShaper;

pub struct SkiaRenderer {
    shaper: TextShaper,
    /// Skip `FillText` commands; keeps pixel output independent of installed fonts.
    pub draw_text: bool,
}

/// Pixels read back from a raster surface, RGBA8 unpremultiplied.
pub struct RgbaImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new(), draw_text: true }
    }

    pub fn without_text(mut self) -> Self {
        self.draw_text = false;
        self
    }

    fn rasterize(&self, frame: &Frame) -> Result<skia::Surface> {
        let (w, h) = (frame.surface.physical_width(), frame.surface.physical_height());
        let w = i32::try_from(w).context("surface width out of range")?;
        let h = i32::try_from(h).context("surface height out of range")?;
        let mut surface = skia::surfaces::raster_n32_premul((w.max(1), h.max(1)))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        self.replay(surface.canvas(), frame);
        debug!(width = w, height = h, commands = frame.commands.len(), "frame rasterized");
        Ok(surface)
    }

    /// Execute every command of `frame` on `canvas`.
    pub fn replay(&self, canvas: &skia::Canvas, frame: &Frame) {
        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_join(skia::paint::Join::Round);
        let mut fill = skia::Color::BLACK;
        let mut path = skia::Path::new();

        for cmd in &frame.commands {
            match cmd {
                DrawCommand::Scale(s) => {
                    canvas.scale((*s, *s));
                }
                DrawCommand::Clear(c) => {
                    canvas.clear(to_skia(*c));
                }
                DrawCommand::SetStroke { color, width } => {
                    stroke.set_color(to_skia(*color));
                    stroke.set_stroke_width(*width);
                }
                DrawCommand::SetFill(c) => fill = to_skia(*c),
                DrawCommand::BeginPath => {
                    path.reset();
                }
                DrawCommand::MoveTo(p) => {
                    path.move_to((p.x, p.y));
                }
                DrawCommand::LineTo(p) => {
                    path.line_to((p.x, p.y));
                }
                DrawCommand::Stroke => {
                    canvas.draw_path(&path, &stroke);
                    path.reset();
                }
                DrawCommand::FillText { text, position, size, align, baseline } => {
                    if self.draw_text {
                        self.shaper.draw(canvas, text, position.x, position.y, *size, fill, *align, *baseline);
                    }
                }
            }
        }
    }

    pub fn render_png_bytes(&self, frame: &Frame) -> Result<Vec<u8>> {
        let mut surface = self.rasterize(frame)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file, creating parent directories as needed.
    pub fn render_to_png(&self, frame: &Frame, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_png_bytes(frame)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn render_rgba8(&self, frame: &Frame) -> Result<RgbaImage> {
        let mut surface = self.rasterize(frame)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("reading back {w}x{h} pixels failed"));
        }
        Ok(RgbaImage { pixels, width: w as u32, height: h as u32, stride })
    }
}
