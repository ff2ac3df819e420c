// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{coding::RecordCodec, Entry};
use std::io::{Read, Seek, SeekFrom};

/// Random-access view over a block of fixed-width records inside a stream
///
/// Records are read lazily, one seek + read per position; only the record
/// at the current position is kept in memory.
pub struct BlockCursor<'a, S> {
    stream: &'a mut S,
    start: u64,
    len: u64,
    codec: RecordCodec,

    current_position: Option<u64>,
    current: Entry,
}

impl<'a, S: Read + Seek> BlockCursor<'a, S> {
    pub fn new(stream: &'a mut S, start: u64, len: u64, codec: RecordCodec) -> Self {
        Self {
            stream,
            start,
            len,
            codec,
            current_position: None,
            current: Entry::default(),
        }
    }

    /// Reads the record at `position` (0-based, `< len`).
    pub fn read_at(&mut self, position: u64) -> crate::Result<&Entry> {
        debug_assert!(position < self.len);

        if self.current_position != Some(position) {
            let offset = self.start + position * self.codec.record_size();
            self.stream.seek(SeekFrom::Start(offset))?;

            self.current = self.codec.decode_from(&mut *self.stream)?;
            self.current_position = Some(position);
        }

        Ok(&self.current)
    }

    /// Returns the first position whose id is not less than `id`,
    /// or `len` if there is none.
    ///
    /// The block must be sorted by id.
    pub fn lower_bound(&mut self, id: &str) -> crate::Result<u64> {
        let mut low = 0;
        let mut high = self.len;

        while low < high {
            let mid = low + (high - low) / 2;

            if self.read_at(mid)?.id.as_str() < id {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        Ok(low)
    }

    /// Binary searches the block for an exact id match.
    pub fn find(&mut self, id: &str) -> crate::Result<Option<Entry>> {
        let position = self.lower_bound(id)?;

        if position >= self.len {
            return Ok(None);
        }

        let entry = self.read_at(position)?;

        if entry.id == id {
            Ok(Some(entry.clone()))
        } else {
            Ok(None)
        }
    }
}
