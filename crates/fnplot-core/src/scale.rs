// File: crates/fnplot-core/src/scale.rs
// Summary: Data <-> device coordinate mapping for a viewport on a surface (Y inverted).

use crate::geometry::{DevicePoint, Point, SurfaceSize};
use crate::view::Viewport;

/// General scale transform operations for X/Y axes.
pub trait ScaleTransform {
    fn to_device_x(&self, x: f64) -> f64;
    fn to_device_y(&self, y: f64) -> f64;
    fn to_data_x(&self, px: f64) -> f64;
    fn to_data_y(&self, py: f64) -> f64;

    fn to_device(&self, p: Point) -> DevicePoint {
        DevicePoint::new(self.to_device_x(p.x) as f32, self.to_device_y(p.y) as f32)
    }
    fn to_data(&self, p: DevicePoint) -> Point {
        Point::new(self.to_data_x(p.x as f64), self.to_data_y(p.y as f64))
    }
}

/// Affine mapping for one viewport/surface pair. Rebuilt on every render.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    x_min: f64,
    y_min: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
}

impl CoordinateMapper {
    /// Uses logical pixels; the viewport contract guarantees positive spans.
    pub fn new(viewport: &Viewport, surface: SurfaceSize) -> Self {
        let width = surface.width as f64;
        let height = surface.height as f64;
        Self {
            x_min: viewport.x_min(),
            y_min: viewport.y_min(),
            height,
            scale_x: width / viewport.x_span(),
            scale_y: height / viewport.y_span(),
        }
    }

    /// Pixels per data unit along X.
    pub fn scale_x(&self) -> f64 { self.scale_x }
    /// Pixels per data unit along Y.
    pub fn scale_y(&self) -> f64 { self.scale_y }
}

impl ScaleTransform for CoordinateMapper {
    #[inline]
    fn to_device_x(&self, x: f64) -> f64 {
        (x - self.x_min) * self.scale_x
    }
    #[inline]
    fn to_device_y(&self, y: f64) -> f64 {
        self.height - (y - self.y_min) * self.scale_y
    }
    #[inline]
    fn to_data_x(&self, px: f64) -> f64 {
        px / self.scale_x + self.x_min
    }
    #[inline]
    fn to_data_y(&self, py: f64) -> f64 {
        (self.height - py) / self.scale_y + self.y_min
    }
}
