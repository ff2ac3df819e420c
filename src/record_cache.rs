// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{Config, Record, RecordList};
use lru::LruCache;
use std::sync::{Arc, Mutex};

/// Which records the cache keeps
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CacheMode {
    /// Nothing is cached
    Off,

    /// Records are cached without their sequence
    MetadataOnly,

    /// Records are cached with their sequence
    #[default]
    MetadataAndSequence,
}

struct CacheState {
    mode: CacheMode,

    /// Most recently used first
    records: LruCache<usize, Arc<Record>>,
}

/// Record cache, in which records are cached in-memory
/// after being retrieved from the inner record list
///
/// Passes where the same ordinals are visited over and over
/// (scoring, reporting) skip repeated decoding.
///
/// Retrieving a record updates the cache, so even though
/// [`RecordList::get`] takes `&self`, the cache state sits behind a lock.
pub struct RecordListCache<L> {
    inner: L,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl<L> std::fmt::Debug for RecordListCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecordListCache<cap: {} records>", self.capacity)
    }
}

impl<L: RecordList> RecordListCache<L> {
    /// Wraps a record list.
    pub fn new(inner: L, config: Config) -> Self {
        Self {
            inner,
            capacity: config.capacity,
            state: Mutex::new(CacheState {
                mode: config.mode,
                records: LruCache::unbounded(),
            }),
        }
    }

    /// Returns the wrapped record list.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Consumes the cache, returning the wrapped record list.
    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Returns the current cache mode.
    #[must_use]
    pub fn mode(&self) -> CacheMode {
        self.state.lock().expect("lock is poisoned").mode
    }

    /// Switches the cache mode.
    ///
    /// Clears the cache if the mode changes.
    pub fn set_mode(&self, mode: CacheMode) {
        let mut state = self.state.lock().expect("lock is poisoned");

        if state.mode != mode {
            log::trace!(
                "Switching record cache from {:?} to {mode:?}, dropping {} records",
                state.mode,
                state.records.len()
            );

            state.records.clear();
            state.mode = mode;
        }
    }

    /// Returns the maximum number of cached records.
    #[must_use]
    pub fn cache_capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of cached records.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.state.lock().expect("lock is poisoned").records.len()
    }

    /// Returns the most recently used cached record.
    #[must_use]
    pub fn most_recent(&self) -> Option<(usize, Arc<Record>)> {
        let state = self.state.lock().expect("lock is poisoned");

        state
            .records
            .iter()
            .next()
            .map(|(ordinal, record)| (*ordinal, record.clone()))
    }

    /// Returns the least recently used cached record.
    #[must_use]
    pub fn least_recent(&self) -> Option<(usize, Arc<Record>)> {
        let state = self.state.lock().expect("lock is poisoned");

        state
            .records
            .peek_lru()
            .map(|(ordinal, record)| (*ordinal, record.clone()))
    }

    /// Returns the cached ordinals, most recently used first.
    #[must_use]
    pub fn cached_ordinals(&self) -> Vec<usize> {
        let state = self.state.lock().expect("lock is poisoned");
        state.records.iter().map(|(ordinal, _)| *ordinal).collect()
    }

    fn insert(&self, state: &mut CacheState, ordinal: usize, record: Arc<Record>) {
        state.records.put(ordinal, record);

        while state.records.len() > self.capacity {
            if let Some((evicted, _)) = state.records.pop_lru() {
                log::trace!("Evicted record {evicted} from record cache");
            }
        }
    }

    /// Looks up `ordinal`, fetching and caching it on a miss.
    fn get_or_fetch(
        &self,
        state: &mut CacheState,
        ordinal: usize,
        with_sequence: bool,
    ) -> crate::Result<Arc<Record>> {
        if let Some(record) = state.records.get(&ordinal).cloned() {
            return Ok(record);
        }

        let mut record = self.inner.get(ordinal, with_sequence)?;

        if !with_sequence && !record.sequence.is_empty() {
            record = Arc::new(record.metadata_only());
        }

        self.insert(state, ordinal, record.clone());

        Ok(record)
    }
}

impl<L: RecordList> RecordList for RecordListCache<L> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn find(&self, id: &str) -> crate::Result<Option<usize>> {
        self.inner.find(id)
    }

    fn get(&self, ordinal: usize, with_sequence: bool) -> crate::Result<Arc<Record>> {
        let mut state = self.state.lock().expect("lock is poisoned");

        match (state.mode, with_sequence) {
            (CacheMode::Off, _) | (CacheMode::MetadataAndSequence, false) => {
                drop(state);
                self.inner.get(ordinal, with_sequence)
            }
            (CacheMode::MetadataOnly, false) | (CacheMode::MetadataAndSequence, true) => {
                self.get_or_fetch(&mut state, ordinal, with_sequence)
            }
            (CacheMode::MetadataOnly, true) => {
                let record = self.inner.get(ordinal, true)?;

                // NOTE: Never cache sequences in this mode
                if !state.records.contains(&ordinal) {
                    self.insert(&mut state, ordinal, Arc::new(record.metadata_only()));
                }

                Ok(record)
            }
        }
    }
}
