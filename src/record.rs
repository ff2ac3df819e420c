// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::sync::Arc;

/// A sequence record (e.g. one protein of a FASTA database)
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Record {
    /// 0-based position in its record list
    pub ordinal: usize,

    /// Record id (e.g. accession)
    pub id: String,

    /// Free-text description
    pub description: String,

    /// Sequence payload
    ///
    /// Empty if the record was retrieved without its sequence.
    pub sequence: String,
}

impl Record {
    /// Creates a new record.
    pub fn new<I, D, S>(ordinal: usize, id: I, description: D, sequence: S) -> Self
    where
        I: Into<String>,
        D: Into<String>,
        S: Into<String>,
    {
        Self {
            ordinal,
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    /// Returns a copy of the record without its sequence.
    #[must_use]
    pub fn metadata_only(&self) -> Self {
        Self {
            ordinal: self.ordinal,
            id: self.id.clone(),
            description: self.description.clone(),
            sequence: String::new(),
        }
    }
}

/// A list of records that can be accessed by ordinal
pub trait RecordList {
    /// Returns the number of records.
    fn len(&self) -> usize;

    /// Returns `true` if there are no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ordinal of the record with the given id.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    fn find(&self, id: &str) -> crate::Result<Option<usize>>;

    /// Retrieves a record.
    ///
    /// If `with_sequence` is `false`, the list may skip loading the sequence.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the ordinal is out of range, or an IO error occurs.
    fn get(&self, ordinal: usize, with_sequence: bool) -> crate::Result<Arc<Record>>;
}

impl<L: RecordList + ?Sized> RecordList for Arc<L> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn find(&self, id: &str) -> crate::Result<Option<usize>> {
        (**self).find(id)
    }

    fn get(&self, ordinal: usize, with_sequence: bool) -> crate::Result<Arc<Record>> {
        (**self).get(ordinal, with_sequence)
    }
}
