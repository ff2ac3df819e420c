// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::Entry;

/// Index trait
///
/// An index maps a record id or ordinal to the byte offset of that record
/// in a separately stored data file.
///
/// An index is built once by a single writer; afterwards any number of
/// threads may call the lookup methods concurrently.
pub trait Index {
    /// Replaces the whole content of the index with the given entries.
    ///
    /// The entries may be passed in any order. Uniqueness of ids is not checked.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an id cannot be indexed, or an IO error occurs.
    fn create(&mut self, entries: Vec<Entry>) -> crate::Result<()>;

    /// Returns the number of indexed entries.
    fn len(&self) -> usize;

    /// Returns `true` if the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entry with the given id.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    fn find_by_id(&self, id: &str) -> crate::Result<Option<Entry>>;

    /// Returns the entry with the given ordinal.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    fn find_by_ordinal(&self, ordinal: u64) -> crate::Result<Option<Entry>>;
}
