//! Per-scale memo of dataset-wide aggregates.

use std::sync::RwLock;

use crate::error::Result;
use crate::grammar::{DataFrame, DatasetId};

/// Caches one aggregate (an extent, a distinct-value list) for the most
/// recently seen dataset.
///
/// The aggregate is computed outside the lock. Two threads racing on the
/// same dataset both compute it and the second store wins; since the value
/// is a pure function of the dataset the result is the same either way.
#[derive(Debug, Default)]
pub struct AggregateCache<T> {
    slot: RwLock<Option<(DatasetId, T)>>,
}

impl<T: Clone> AggregateCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self { slot: RwLock::new(None) }
    }

    /// Aggregate for `data`, computing it with `compute` on a miss.
    ///
    /// Aggregates are taken over [`DataFrame::origin`], so every panel split
    /// from one frame shares a single cached value with that frame.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`; failures are not cached.
    pub fn get_or_compute<F>(&self, data: &DataFrame, compute: F) -> Result<T>
    where
        F: FnOnce(&DataFrame) -> Result<T>,
    {
        let data = data.origin();
        let id = data.id();
        if let Ok(guard) = self.slot.read() {
            if let Some((cached_id, value)) = guard.as_ref() {
                if *cached_id == id {
                    return Ok(value.clone());
                }
            }
        }

        let value = compute(data)?;
        if let Ok(mut guard) = self.slot.write() {
            *guard = Some((id, value.clone()));
        }
        Ok(value)
    }

    /// Dataset whose aggregate is currently held.
    #[must_use]
    pub fn cached_for(&self) -> Option<DatasetId> {
        self.slot.read().ok().and_then(|guard| guard.as_ref().map(|(id, _)| *id))
    }
}

impl<T: Clone> Clone for AggregateCache<T> {
    fn clone(&self) -> Self {
        let held = self.slot.read().ok().and_then(|guard| guard.clone());
        Self { slot: RwLock::new(held) }
    }
}
