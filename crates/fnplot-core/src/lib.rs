// File: crates/fnplot-core/src/lib.rs
// Summary: Core library entry point; exports sampling, viewport, grid planning and frame composition.

pub mod chart;
pub mod collection;
pub mod compose;
pub mod curve;
pub mod downsample;
pub mod draw;
pub mod error;
pub mod eval;
pub mod geometry;
pub mod grid;
pub mod pen;
pub mod sample;
pub mod scale;
pub mod store;
mod svg;
pub mod theme;
pub mod types;
pub mod view;

pub use chart::{Chart, ChartOptions, PendingCurve};
pub use collection::{CurveCollection, CurveSet, Ticket};
pub use compose::{compose, RenderOptions, PLACEHOLDER_TEXT};
pub use curve::{CurveId, CurveRequest, SampledCurve, SamplePoint};
pub use downsample::{decimate_runs, lttb};
pub use draw::{DrawCommand, Frame, TextAlign, TextBaseline};
pub use error::{DomainIssue, PlotError, StoreError};
pub use eval::{EvalError, Evaluator};
pub use geometry::{DevicePoint, DeviceRect, Point, SurfaceSize};
pub use grid::{GridPlan, Tick, TickKind, ViewportGrid};
pub use pen::{LiftReason, Pen, PenAction, PenState};
pub use sample::{sample, sample_with_cancel, CancelToken, Domain};
pub use scale::{CoordinateMapper, ScaleTransform};
pub use store::{FunctionStore, MemoryStore, NewFunction, SavedFunction};
pub use theme::{Color, Theme};
pub use view::{PanDirection, Viewport};
