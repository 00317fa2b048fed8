// File: crates/fnplot-core/src/chart.rs
// Summary: Chart session: evaluator, curve collection and viewport, plus the add/remove/render API.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::collection::{CurveCollection, Ticket};
use crate::compose::{compose, RenderOptions};
use crate::curve::{CurveId, CurveRequest, SampledCurve};
use crate::draw::Frame;
use crate::error::PlotError;
use crate::eval::Evaluator;
use crate::geometry::SurfaceSize;
use crate::sample::{sample_with_cancel, Domain};
use crate::types::MAX_SAMPLES;
use crate::view::{PanDirection, Viewport};

#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub max_samples: usize,
    pub default_view: Viewport,
    pub render: RenderOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            max_samples: MAX_SAMPLES,
            default_view: Viewport::DEFAULT,
            render: RenderOptions::default(),
        }
    }
}

struct Shared {
    curves: CurveCollection,
    viewport: RwLock<Viewport>,
}

pub struct Chart<E> {
    evaluator: Arc<E>,
    shared: Arc<Shared>,
    options: ChartOptions,
}

/// Handle to a sampling job running on a worker thread.
pub struct PendingCurve {
    id: CurveId,
    ticket: Ticket,
    handle: JoinHandle<Result<CurveId, PlotError>>,
}

impl PendingCurve {
    pub fn id(&self) -> CurveId {
        self.id
    }

    /// Ask the worker to stop; its result will not be merged.
    pub fn cancel(&self) {
        self.ticket.cancel_token().cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the job. A job whose id was removed meanwhile reports `Cancelled`.
    pub fn join(self) -> Result<CurveId, PlotError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl<E: Evaluator + 'static> Chart<E> {
    pub fn new(evaluator: E) -> Self {
        Self::with_options(evaluator, ChartOptions::default())
    }

    pub fn with_options(evaluator: E, options: ChartOptions) -> Self {
        let shared = Shared {
            curves: CurveCollection::new(),
            viewport: RwLock::new(options.default_view),
        };
        Self { evaluator: Arc::new(evaluator), shared: Arc::new(shared), options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn render_options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options.render
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    fn domain_for(&self, req: &CurveRequest) -> Result<Domain, PlotError> {
        Domain::with_limit(req.start, req.end, req.step, self.options.max_samples).inspect_err(|e| {
            warn!(curve = %req.id, expression = %req.expression, error = %e, "rejected curve request");
        })
    }

    /// Sample and merge on the calling thread.
    pub fn add_curve(&self, req: CurveRequest) -> Result<CurveId, PlotError> {
        let domain = self.domain_for(&req)?;
        let ticket = self.shared.curves.reserve(req.id);
        run_job(self.evaluator.as_ref(), &self.shared, &ticket, req, domain)
    }

    /// Sample on a worker thread. Domain errors are still reported synchronously.
    pub fn spawn_curve(&self, req: CurveRequest) -> Result<PendingCurve, PlotError> {
        let domain = self.domain_for(&req)?;
        let id = req.id;
        let ticket = self.shared.curves.reserve(id);
        let evaluator = Arc::clone(&self.evaluator);
        let shared = Arc::clone(&self.shared);
        let job_ticket = ticket.clone();
        let handle = thread::Builder::new()
            .name(format!("fnplot-sample-{}", id.get()))
            .spawn(move || run_job(evaluator.as_ref(), &shared, &job_ticket, req, domain))
            .map_err(|e| {
                // the worker never started; release the reservation
                warn!(curve = %id, error = %e, "failed to spawn sampling worker");
                self.shared.curves.abandon(&ticket);
                PlotError::Cancelled(id)
            })?;
        Ok(PendingCurve { id, ticket, handle })
    }

    /// Remove a curve, cancelling its job if still running.
    pub fn remove_curve(&self, id: CurveId) -> bool {
        let removed = self.shared.curves.remove(id);
        if removed {
            info!(curve = %id, "curve removed");
        }
        removed
    }

    pub fn clear(&self) {
        self.shared.curves.clear();
        info!("all curves cleared");
    }

    /// Re-sample every plotted curve with its original expression, domain and color.
    pub fn resample_all(&self) -> Vec<(CurveId, Result<CurveId, PlotError>)> {
        self.curves()
            .iter()
            .map(|c| {
                let req = CurveRequest {
                    id: c.id,
                    expression: c.expression.clone(),
                    start: c.domain.start(),
                    end: c.domain.end(),
                    step: c.domain.step(),
                    color: c.color,
                };
                (c.id, self.add_curve(req))
            })
            .collect()
    }

    /// Sampled curves in submission order.
    pub fn curves(&self) -> Vec<Arc<SampledCurve>> {
        self.shared.curves.curves()
    }

    pub fn curve(&self, id: CurveId) -> Option<Arc<SampledCurve>> {
        self.shared.curves.get(id)
    }

    pub fn is_pending(&self, id: CurveId) -> bool {
        self.shared.curves.snapshot().is_pending(id)
    }

    pub fn viewport(&self) -> Viewport {
        *self.shared.viewport.read()
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        *self.shared.viewport.write() = viewport;
    }

    fn update_view(&self, f: impl FnOnce(&Viewport) -> Viewport) -> Viewport {
        let mut guard = self.shared.viewport.write();
        *guard = f(&guard);
        *guard
    }

    pub fn zoom(&self, factor: f64) -> Viewport {
        self.update_view(|v| v.zoom(factor))
    }

    pub fn pan(&self, direction: PanDirection, fraction: f64) -> Viewport {
        self.update_view(|v| v.pan(direction, fraction))
    }

    pub fn reset_view(&self) -> Viewport {
        let default = self.options.default_view;
        self.update_view(|_| default)
    }

    pub fn fit_view(&self) -> Viewport {
        let curves = self.curves();
        self.update_view(|v| v.fit(curves.iter().map(|c| c.as_ref())))
    }

    pub fn fit_y_visible(&self) -> Viewport {
        let curves = self.curves();
        self.update_view(|v| v.fit_y_visible(curves.iter().map(|c| c.as_ref())))
    }

    /// Compose a frame from one consistent snapshot of curves and viewport.
    pub fn render(&self, surface: SurfaceSize) -> Frame {
        let snapshot = self.shared.curves.snapshot();
        let viewport = self.viewport();
        compose(snapshot.curves(), &viewport, surface, &self.options.render)
    }
}

/// Abandons the ticket if the evaluator panics, so the id is not left pending forever.
struct ReleaseOnUnwind<'a> {
    collection: &'a CurveCollection,
    ticket: &'a Ticket,
}

impl Drop for ReleaseOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            warn!(curve = %self.ticket.id(), "evaluator panicked; releasing reservation");
            self.collection.abandon(self.ticket);
        }
    }
}

fn run_job<E: Evaluator + ?Sized>(
    evaluator: &E,
    shared: &Shared,
    ticket: &Ticket,
    req: CurveRequest,
    domain: Domain,
) -> Result<CurveId, PlotError> {
    let id = req.id;
    let _release = ReleaseOnUnwind { collection: &shared.curves, ticket };
    let points = match sample_with_cancel(evaluator, &req.expression, &domain, id, ticket.cancel_token()) {
        Ok(points) => points,
        Err(e) => {
            if !matches!(e, PlotError::Cancelled(_)) {
                warn!(curve = %id, error = %e, "sampling failed");
            }
            shared.curves.abandon(ticket);
            return Err(e);
        }
    };
    let curve = SampledCurve { id, expression: req.expression, color: req.color, domain, points };
    if !shared.curves.commit(ticket, curve) {
        return Err(PlotError::Cancelled(id));
    }
    let mut view = shared.viewport.write();
    *view = view.include_x(domain.start(), domain.end());
    debug!(curve = %id, "viewport widened to cover curve domain");
    Ok(id)
}
