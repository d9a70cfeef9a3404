use crate::error::AqiError;
use crate::frames::dataset::Dataset;
use log::{debug, info};
use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Memoizes loaded datasets by source path.
///
/// Each source is loaded at most once: the lock is held across the load, so a
/// concurrent request for the same path waits and then reuses the result. Entries
/// are never invalidated since the sources are static files.
#[derive(Default)]
pub struct DatasetCache {
    datasets: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, AqiError> {
        // Cached values are immutable, a panic elsewhere cannot leave them half-written.
        let mut datasets = self.datasets.lock().unwrap_or_else(PoisonError::into_inner);

        match datasets.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                debug!("Dataset cache hit for {:?}", path);
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                info!("Dataset cache miss for {:?}, loading", path);
                // A failed load is not cached; the next call retries.
                let dataset = Arc::new(Dataset::load(path)?);
                Ok(Arc::clone(entry.insert(dataset)))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
