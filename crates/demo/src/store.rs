// File: crates/demo/src/store.rs
// Summary: CSV-file implementation of the saved-function store.

use std::path::{Path, PathBuf};

use chrono::Utc;
use fnplot_core::store::sort_newest_first;
use fnplot_core::{FunctionStore, NewFunction, SavedFunction, StoreError};
use tracing::{debug, info};

fn backend(e: impl std::error::Error + Send + Sync + 'static) -> StoreError {
    StoreError::Backend(Box::new(e))
}

/// Every record lives in one CSV file that is rewritten on each change.
pub struct CsvStore {
    path: PathBuf,
    records: Vec<SavedFunction>,
}

impl CsvStore {
    /// Open `path`, treating a missing file as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() { read_records(&path)? } else { Vec::new() };
        debug!(path = %path.display(), records = records.len(), "opened function store");
        Ok(Self { path, records })
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(backend)?;
        }
        let mut wtr = csv::Writer::from_path(&self.path).map_err(backend)?;
        for rec in &self.records {
            wtr.serialize(rec).map_err(backend)?;
        }
        wtr.flush().map_err(backend)?;
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<&SavedFunction, StoreError> {
        self.records.iter().find(|r| r.id == id).ok_or(StoreError::NotFound(id))
    }
}

fn read_records(path: &Path) -> Result<Vec<SavedFunction>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path).map_err(backend)?;
    rdr.deserialize().collect::<Result<Vec<SavedFunction>, _>>().map_err(backend)
}

impl FunctionStore for CsvStore {
    fn create(&mut self, new: NewFunction) -> Result<SavedFunction, StoreError> {
        new.validate()?;
        let saved = new.into_saved(self.next_id(), Utc::now());
        self.records.push(saved.clone());
        self.flush()?;
        info!(id = saved.id, expression = %saved.expression, "function saved");
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
        self.flush()?;
        info!(id, "function deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fnplot-demo-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("functions.csv")
    }

    #[test]
    fn records_survive_reopen() {
        let path = temp_path("reopen");
        let mut store = CsvStore::open(&path).unwrap();
        let a = store.create(NewFunction::new("sin(x)", -3.0, 3.0, 0.1)).unwrap();
        let b = store.create(NewFunction::new("x^2", -1.0, 1.0, 0.25)).unwrap();

        let reopened = CsvStore::open(&path).unwrap();
        let listed = reopened.list().unwrap();
        assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), vec![b.id, a.id]);
        assert_eq!(reopened.get(a.id).unwrap(), &a);
    }

    #[test]
    fn delete_persists_and_reports_missing() {
        let path = temp_path("delete");
        let mut store = CsvStore::open(&path).unwrap();
        let a = store.create(NewFunction::new("x", 0.0, 1.0, 0.5)).unwrap();
        store.delete(a.id).unwrap();
        assert!(matches!(store.delete(a.id), Err(StoreError::NotFound(_))));
        assert!(CsvStore::open(&path).unwrap().list().unwrap().is_empty());
    }
}
