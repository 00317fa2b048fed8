// File: crates/fnplot-core/src/store.rs
// Summary: Saved-function records and the storage trait, with an in-memory implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::curve::CurveRequest;
use crate::error::{PlotError, StoreError};
use crate::sample::Domain;
use crate::theme::Color;

/// A function the user chose to keep, with the range it was plotted over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedFunction {
    pub id: u64,
    pub expression: String,
    pub range_start: f64,
    pub range_end: f64,
    pub step: f64,
    pub created_at: DateTime<Utc>,
}

impl SavedFunction {
    pub fn domain(&self, max_samples: usize) -> Result<Domain, PlotError> {
        Domain::with_limit(self.range_start, self.range_end, self.step, max_samples)
    }

    /// Request that plots this function again under a fresh curve id.
    pub fn request(&self, color: Color) -> CurveRequest {
        CurveRequest::new(self.expression.clone(), self.range_start, self.range_end, self.step, color)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewFunction {
    pub expression: String,
    pub range_start: f64,
    pub range_end: f64,
    pub step: f64,
}

impl NewFunction {
    pub fn new(expression: impl Into<String>, range_start: f64, range_end: f64, step: f64) -> Self {
        Self { expression: expression.into(), range_start, range_end, step }
    }

    /// Field presence only; range ordering is checked when the function is plotted.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.expression.trim().is_empty() {
            return Err(StoreError::Incomplete("expression is empty"));
        }
        if !(self.range_start.is_finite() && self.range_end.is_finite() && self.step.is_finite()) {
            return Err(StoreError::Incomplete("range start, range end and step must be numbers"));
        }
        Ok(())
    }

    pub fn into_saved(self, id: u64, created_at: DateTime<Utc>) -> SavedFunction {
        SavedFunction {
            id,
            expression: self.expression.trim().to_string(),
            range_start: self.range_start,
            range_end: self.range_end,
            step: self.step,
            created_at,
        }
    }
}

pub trait FunctionStore {
    fn create(&mut self, new: NewFunction) -> Result<SavedFunction, StoreError>;
    /// Newest first; equal timestamps fall back to descending id.
    fn list(&self) -> Result<Vec<SavedFunction>, StoreError>;
    fn delete(&mut self, id: u64) -> Result<(), StoreError>;
}

/// Order records newest first.
pub fn sort_newest_first(records: &mut [SavedFunction]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<SavedFunction>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FunctionStore for MemoryStore {
    fn create(&mut self, new: NewFunction) -> Result<SavedFunction, StoreError> {
        new.validate()?;
        self.next_id += 1;
        let saved = new.into_saved(self.next_id, Utc::now());
        self.records.push(saved.clone());
        tracing::debug!(id = saved.id, expression = %saved.expression, "function saved");
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedFunction>, StoreError> {
        let mut out = self.records.clone();
        sort_newest_first(&mut out);
        Ok(out)
    }

    fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
