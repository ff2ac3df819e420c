// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::CacheMode;

/// Record cache configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of cached records
    pub(crate) capacity: usize,

    /// Initial cache mode
    pub(crate) mode: CacheMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 50_000,
            mode: CacheMode::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Sets the maximum number of cached records.
    ///
    /// A capacity of 0 disables caching.
    ///
    /// Default = 50 000
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the initial cache mode.
    ///
    /// Default = [`CacheMode::MetadataAndSequence`]
    #[must_use]
    pub fn mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }
}
