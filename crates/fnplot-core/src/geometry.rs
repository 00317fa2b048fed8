// File: crates/fnplot-core/src/geometry.rs
// Summary: Lightweight geometry helpers for data points and device pixel math.

use crate::types::{HEIGHT, WIDTH};

/// A point in data (function) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in device space (logical pixels, Y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DevicePoint {
    pub x: f32,
    pub y: f32,
}

impl DevicePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in device space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DeviceRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Grow the rectangle by `margin` pixels on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self::from_ltrb(self.left - margin, self.top - margin, self.right + margin, self.bottom + margin)
    }

    /// Inclusive containment test; NaN coordinates are never contained.
    pub fn contains(&self, p: DevicePoint) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Size of the rendering surface.
/// Contract: `width`/`height` are logical pixels (>= 1); `pixel_ratio` > 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_pixel_ratio(width, height, 1.0)
    }

    /// Non-finite or non-positive values fall back to 1.
    pub fn with_pixel_ratio(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Self { width: sane(width), height: sane(height), pixel_ratio: ratio }
    }

    /// Backing-store width in physical pixels.
    pub fn physical_width(&self) -> u32 { (self.width * self.pixel_ratio).ceil() as u32 }
    /// Backing-store height in physical pixels.
    pub fn physical_height(&self) -> u32 { (self.height * self.pixel_ratio).ceil() as u32 }

    pub fn bounds(&self) -> DeviceRect {
        DeviceRect::from_ltwh(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> DevicePoint {
        DevicePoint::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn is_scaled(&self) -> bool {
        (self.pixel_ratio - 1.0).abs() > f32::EPSILON
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}
