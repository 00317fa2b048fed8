// File: crates/fnplot-core/src/collection.rs
// Summary: Copy-on-write mapping from curve id to sampled curve, with reservation tickets.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::curve::{CurveId, SampledCurve};
use crate::sample::CancelToken;

/// Proof that a sampling job is the current one for its id.
#[derive(Clone, Debug)]
pub struct Ticket {
    id: CurveId,
    generation: u64,
    cancel: CancelToken,
}

impl Ticket {
    pub fn id(&self) -> CurveId { self.id }
    pub fn cancel_token(&self) -> &CancelToken { &self.cancel }
}

/// Immutable view of the collection at one instant.
#[derive(Clone, Debug, Default)]
pub struct CurveSet {
    // submission order of every wanted id, sampled or still pending
    order: Vec<CurveId>,
    curves: HashMap<CurveId, Arc<SampledCurve>>,
    pending: HashMap<CurveId, (u64, CancelToken)>,
    next_generation: u64,
}

impl CurveSet {
    /// Sampled curves in submission order.
    pub fn curves(&self) -> impl Iterator<Item = &SampledCurve> + '_ {
        self.order.iter().filter_map(|id| self.curves.get(id).map(|c| c.as_ref()))
    }

    pub fn get(&self, id: CurveId) -> Option<&Arc<SampledCurve>> {
        self.curves.get(&id)
    }

    pub fn is_pending(&self, id: CurveId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of sampled curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn ids(&self) -> &[CurveId] {
        &self.order
    }
}

/// Shared curve collection. Readers get an `Arc` snapshot; writers copy on write.
#[derive(Debug, Default)]
pub struct CurveCollection {
    inner: RwLock<Arc<CurveSet>>,
}

impl CurveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<CurveSet> {
        Arc::clone(&self.inner.read())
    }

    /// Sampled curves in submission order, as shared handles.
    pub fn curves(&self) -> Vec<Arc<SampledCurve>> {
        let snap = self.snapshot();
        snap.order.iter().filter_map(|id| snap.curves.get(id).cloned()).collect()
    }

    pub fn get(&self, id: CurveId) -> Option<Arc<SampledCurve>> {
        self.snapshot().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Mark `id` as wanted. An older in-flight job for the same id is cancelled.
    pub fn reserve(&self, id: CurveId) -> Ticket {
        let mut guard = self.inner.write();
        let set = Arc::make_mut(&mut guard);
        set.next_generation += 1;
        let generation = set.next_generation;
        let cancel = CancelToken::new();
        if let Some((_, old)) = set.pending.insert(id, (generation, cancel.clone())) {
            old.cancel();
        }
        if !set.order.contains(&id) {
            set.order.push(id);
        }
        Ticket { id, generation, cancel }
    }

    /// Merge `curve` if `ticket` is still current. Returns whether it was merged.
    pub fn commit(&self, ticket: &Ticket, curve: SampledCurve) -> bool {
        debug_assert_eq!(ticket.id, curve.id, "ticket and curve disagree on id");
        let mut guard = self.inner.write();
        if !is_current(&guard, ticket) {
            warn!(curve = %ticket.id, "discarding result of a superseded or removed request");
            return false;
        }
        let set = Arc::make_mut(&mut guard);
        set.pending.remove(&ticket.id);
        set.curves.insert(ticket.id, Arc::new(curve));
        debug!(curve = %ticket.id, "curve merged");
        true
    }

    /// Drop a failed reservation. A curve committed earlier under the id survives.
    pub fn abandon(&self, ticket: &Ticket) {
        let mut guard = self.inner.write();
        if !is_current(&guard, ticket) {
            return;
        }
        let set = Arc::make_mut(&mut guard);
        set.pending.remove(&ticket.id);
        if !set.curves.contains_key(&ticket.id) {
            set.order.retain(|id| *id != ticket.id);
        }
    }

    /// Forget `id` entirely, cancelling any in-flight job. Returns whether anything was there.
    pub fn remove(&self, id: CurveId) -> bool {
        let mut guard = self.inner.write();
        if !guard.order.contains(&id) {
            return false;
        }
        let set = Arc::make_mut(&mut guard);
        if let Some((_, cancel)) = set.pending.remove(&id) {
            cancel.cancel();
        }
        set.curves.remove(&id);
        set.order.retain(|x| *x != id);
        true
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write();
        for (_, cancel) in guard.pending.values() {
            cancel.cancel();
        }
        let next_generation = guard.next_generation;
        *guard = Arc::new(CurveSet { next_generation, ..CurveSet::default() });
    }
}

fn is_current(set: &CurveSet, ticket: &Ticket) -> bool {
    set.pending.get(&ticket.id).is_some_and(|(g, _)| *g == ticket.generation)
}
