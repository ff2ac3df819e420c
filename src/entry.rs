// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// One index record
///
/// Points from a record's id and ordinal position to the byte offset
/// of that record in the (separately stored) data file.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Entry {
    /// Record id (e.g. protein accession)
    pub id: String,

    /// 0-based position in the logical record list
    pub ordinal: u64,

    /// Byte offset of the record in the data file
    pub offset: u64,
}

impl Entry {
    /// Creates a new index entry.
    pub fn new<S: Into<String>>(id: S, ordinal: u64, offset: u64) -> Self {
        Self {
            id: id.into(),
            ordinal,
            offset,
        }
    }
}
