// File: crates/fnplot-core/src/types.rs
// Summary: Shared constants (surface size, sampling cap, default extent, margins).

/// Default surface width in logical pixels.
pub const WIDTH: f32 = 1024.0;
/// Default surface height in logical pixels.
pub const HEIGHT: f32 = 640.0;

/// Upper bound on `(end - start) / step` for a single sampling request.
pub const MAX_SAMPLES: usize = 100_000;

/// Half-width of the default viewport on both axes.
pub const DEFAULT_EXTENT: f64 = 10.0;

/// Smallest extent a viewport may have on either axis. Keeps `pixels / span` finite
/// and the grid step a normal float.
pub const MIN_SPAN: f64 = 1e-300;

/// Pixel buffer around the surface inside which a curve keeps its pen down.
pub const STROKE_MARGIN_PX: f32 = 100.0;

/// Aim for roughly this many major grid lines per axis.
pub const GRID_TARGET_LINES: f64 = 5.0;

/// Labels closer than this to the perpendicular axis are skipped.
pub const LABEL_AXIS_CLEARANCE_PX: f32 = 10.0;
