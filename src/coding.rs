// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Fixed-width binary encoding of the stream index.
//!
//! All scalars are written in the platform's native byte order and word size
//! (64 bit). An index written on a big-endian machine cannot be read on a
//! little-endian one and vice versa.

use crate::Entry;
use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Size of the header region in front of the index body
///
/// 8 bytes of indexed file size followed by 40 bytes of ASCII SHA-1.
/// The region belongs to the caller and is never interpreted here.
pub const RESERVED_HEADER_SIZE: usize = 48;

/// Size of the two layout scalars (`body_length`, `id_width`)
pub const LAYOUT_HEADER_SIZE: u64 = 2 * std::mem::size_of::<u64>() as u64;

/// Upper bound for the padded id width
pub const MAX_ID_WIDTH: u64 = 2_000;

const ID_PADDING: u8 = b' ';

/// Error during deserialization
#[derive(Debug)]
pub enum DecodeError {
    /// I/O error
    Io(std::io::Error),

    /// Stored id is not valid UTF-8
    InvalidId(std::string::FromUtf8Error),
}

impl From<std::io::Error> for DecodeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// The two scalars following the reserved header region
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LayoutHeader {
    /// Byte length of the layout header and both record blocks
    ///
    /// Bounds valid reads when the stream still holds leftovers of a
    /// previous, larger index.
    pub body_length: i64,

    /// Longest id length + 1; every id is space-padded to this width
    pub id_width: u64,
}

impl LayoutHeader {
    /// Computes the header of an index holding `count` entries.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn for_entries(count: u64, id_width: u64) -> Self {
        let record_size = RecordCodec::new(id_width).record_size();

        Self {
            body_length: (LAYOUT_HEADER_SIZE + record_size * count * 2) as i64,
            id_width,
        }
    }

    /// Returns the size of one record.
    #[must_use]
    pub fn record_size(&self) -> u64 {
        RecordCodec::new(self.id_width).record_size()
    }

    /// Returns the number of entries, or `None` if the header does not
    /// describe a well-formed body.
    #[must_use]
    pub fn entry_count(&self) -> Option<u64> {
        if self.id_width == 0 || self.id_width > MAX_ID_WIDTH {
            return None;
        }

        let body_length = u64::try_from(self.body_length).ok()?;
        let record_area = body_length.checked_sub(LAYOUT_HEADER_SIZE)?;
        let block_pair = self.record_size() * 2;

        if record_area % block_pair != 0 {
            return None;
        }

        Some(record_area / block_pair)
    }

    /// Serializes into writer.
    pub fn encode_into<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_i64::<NativeEndian>(self.body_length)?;
        writer.write_u64::<NativeEndian>(self.id_width)?;
        Ok(())
    }

    /// Deserializes from reader.
    pub fn decode_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let body_length = reader.read_i64::<NativeEndian>()?;
        let id_width = reader.read_u64::<NativeEndian>()?;

        Ok(Self {
            body_length,
            id_width,
        })
    }
}

/// Encodes entries as constant-length records:
///
/// [id, space-padded to `id_width`][ordinal: u64][offset: u64]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RecordCodec {
    id_width: u64,
}

impl RecordCodec {
    /// Creates a codec for the given padded id width.
    #[must_use]
    pub fn new(id_width: u64) -> Self {
        Self { id_width }
    }

    /// Returns the padded id width.
    #[must_use]
    pub fn id_width(&self) -> u64 {
        self.id_width
    }

    /// Returns the encoded size of a single record.
    #[must_use]
    pub fn record_size(&self) -> u64 {
        self.id_width + 2 * std::mem::size_of::<u64>() as u64
    }

    /// Serializes an entry into writer.
    ///
    /// The id must be shorter than the padded width.
    pub fn encode_into<W: Write>(&self, entry: &Entry, writer: &mut W) -> std::io::Result<()> {
        let id = entry.id.as_bytes();
        debug_assert!((id.len() as u64) < self.id_width);

        writer.write_all(id)?;

        let padding = self.id_width - id.len() as u64;
        std::io::copy(&mut std::io::repeat(ID_PADDING).take(padding), writer)?;

        writer.write_u64::<NativeEndian>(entry.ordinal)?;
        writer.write_u64::<NativeEndian>(entry.offset)?;

        Ok(())
    }

    /// Deserializes only the id of a record, leaving the reader
    /// positioned in front of the ordinal.
    pub fn decode_id_from<R: Read>(&self, reader: &mut R) -> Result<String, DecodeError> {
        // NOTE: id_width is bounded by MAX_ID_WIDTH
        #[allow(clippy::cast_possible_truncation)]
        let mut id = vec![0; self.id_width as usize];
        reader.read_exact(&mut id)?;

        while id.last() == Some(&ID_PADDING) {
            id.pop();
        }

        String::from_utf8(id).map_err(DecodeError::InvalidId)
    }

    /// Deserializes an entry from reader.
    pub fn decode_from<R: Read>(&self, reader: &mut R) -> Result<Entry, DecodeError> {
        let id = self.decode_id_from(reader)?;
        let ordinal = reader.read_u64::<NativeEndian>()?;
        let offset = reader.read_u64::<NativeEndian>()?;

        Ok(Entry {
            id,
            ordinal,
            offset,
        })
    }
}
