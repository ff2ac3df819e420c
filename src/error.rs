// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::coding::DecodeError;

/// Represents errors that can occur in the index or record cache
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// An id exceeded the sanity ceiling while building an index
    ///
    /// Ids this long usually mean the source file is not being parsed correctly.
    IdTooLong {
        /// The offending id
        id: String,

        /// Padded field width the id would need
        length: usize,
    },

    /// An id ending in the space used to pad id fields
    ///
    /// Such an id would not read back unchanged.
    InvalidId(String),

    /// Entry ordinals do not form the contiguous range `0..len`
    NonContiguousOrdinals {
        /// Ordinal expected at this position
        expected: u64,

        /// Ordinal actually found
        found: u64,
    },

    /// Record ordinal is past the end of a record list
    OrdinalOutOfRange {
        /// Requested ordinal
        ordinal: usize,

        /// Length of the list
        len: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdTooLong { id, length } => write!(
                f,
                "SeqIndexError: creating index with huge id ({length} bytes, {id:?}) probably means ids are not being parsed correctly"
            ),
            _ => write!(f, "SeqIndexError: {self:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DecodeError> for Error {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::Io(e) => Self::Io(e),
            DecodeError::InvalidId(e) => {
                Self::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }
        }
    }
}

/// Index result
pub type Result<T> = std::result::Result<T, Error>;
