//! Optional memoization wrapper over the pure pipeline.
//!
//! The core never caches; repeated lookups for the same target and
//! financial parameters are an external concern. This wrapper keys on
//! the target id plus the serialized configuration and hands back a
//! clone of the stored result on a hit. Callers must use one cache per
//! record set: the record slice is not part of the key.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use housing_map_housing_models::{AnalysisConfig, AnalysisResult, LocationRecord};

use crate::{AnalysisError, orchestrator};

/// Memoizing decorator over [`orchestrator::run_analysis`].
///
/// Thread-safe; concurrent callers share the store behind a mutex.
#[derive(Debug, Default)]
pub struct CachedAnalysis {
    store: Mutex<BTreeMap<String, AnalysisResult>>,
}

impl CachedAnalysis {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the analysis, reusing a stored result when the same target
    /// and configuration were analyzed before.
    ///
    /// # Errors
    ///
    /// Propagates every [`AnalysisError`] from the underlying run, plus
    /// [`AnalysisError::CacheKey`] if the configuration fails to
    /// serialize. Failed runs are not cached.
    pub fn run_analysis(
        &self,
        records: &[LocationRecord],
        target: &LocationRecord,
        config: &AnalysisConfig,
    ) -> Result<AnalysisResult, AnalysisError> {
        let key = format!("{}|{}", target.id, serde_json::to_string(config)?);

        {
            let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = store.get(&key) {
                log::debug!("Analysis cache hit for {}", target.id);
                return Ok(hit.clone());
            }
        }

        let result = orchestrator::run_analysis(records, target, config)?;

        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.insert(key, result.clone());
        Ok(result)
    }

    /// Number of stored results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stored result.
    pub fn clear(&self) {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
