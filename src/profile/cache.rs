//! Profile cache keyed by assessment fingerprint.
//!
//! Classification is deterministic, so a profile computed once for a given
//! set of answers can be handed out again.  A UI that recomputes on every
//! incremental selection hits the cache whenever the user toggles back to an
//! earlier answer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Assessment, PersonalityProfile, ProfileEngine};
use crate::classify::ClassifyError;

/// Entries kept before the cache starts evicting.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Thread-safe memo of profiles for one [`ProfileEngine`].
///
/// Keys are [`Assessment::key`] fingerprints.  Entries never go stale because
/// the engine's catalog is immutable.  The map holds at most `capacity`
/// profiles; inserting past that evicts an arbitrary entry.
#[derive(Debug, Clone)]
pub struct ProfileCache {
    engine: ProfileEngine,
    capacity: usize,
    entries: Arc<RwLock<HashMap<String, Arc<PersonalityProfile>>>>,
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(ProfileEngine::default())
    }
}

impl ProfileCache {
    /// Create an empty cache in front of `engine`.
    pub fn new(engine: ProfileEngine) -> Self {
        Self::with_capacity(engine, DEFAULT_CAPACITY)
    }

    /// Create an empty cache holding at most `capacity` profiles (minimum 1).
    pub fn with_capacity(engine: ProfileEngine, capacity: usize) -> Self {
        Self {
            engine,
            capacity: capacity.max(1),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Maximum number of profiles retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The engine results are computed with.
    pub fn engine(&self) -> &ProfileEngine {
        &self.engine
    }

    /// Return the cached profile for `assessment`, computing it on a miss.
    ///
    /// Malformed assessments are not cached.
    pub fn assess(
        &self,
        assessment: &Assessment,
    ) -> Result<Arc<PersonalityProfile>, ClassifyError> {
        let key = assessment.key();
        if let Some(hit) = self.entries.read().get(&key) {
            log::debug!("Profile cache hit: {}", key);
            return Ok(Arc::clone(hit));
        }

        let profile = Arc::new(self.engine.assess(assessment)?);
        let mut entries = self.entries.write();
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            if let Some(victim) = entries.keys().next().cloned() {
                log::debug!("Profile cache full ({}), evicting {}", self.capacity, victim);
                entries.remove(&victim);
            }
        }
        // a concurrent caller may have filled the slot; both values are identical
        let stored = entries.entry(key).or_insert(profile);
        Ok(Arc::clone(stored))
    }

    /// Cached profile for `assessment`, if any.
    pub fn get(&self, assessment: &Assessment) -> Option<Arc<PersonalityProfile>> {
        self.entries.read().get(&assessment.key()).cloned()
    }

    /// Drop every memoized profile.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Profiles currently memoized.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no assessment has been memoized yet (or since `clear`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
