// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod cursor;

use crate::{
    coding::{LayoutHeader, RecordCodec, LAYOUT_HEADER_SIZE, MAX_ID_WIDTH, RESERVED_HEADER_SIZE},
    Entry, Error, Index,
};
use cursor::BlockCursor;
use std::{
    io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write},
    sync::Mutex,
};

/// Where the record blocks of the current index generation live
#[derive(Copy, Clone, Debug)]
struct Layout {
    codec: RecordCodec,
    count: u64,
}

impl Layout {
    fn by_ordinal_start() -> u64 {
        RESERVED_HEADER_SIZE as u64 + LAYOUT_HEADER_SIZE
    }

    fn by_id_start(&self) -> u64 {
        Self::by_ordinal_start() + self.codec.record_size() * self.count
    }
}

/// A sorted index that lives entirely inside a seekable byte stream
///
/// The index body is never loaded into memory. Stream layout:
///
/// [reserved header, 48 bytes][body_length: i64][id_width: u64]
/// [records sorted by ordinal][records sorted by id]
///
/// Every record is `id_width + 16` bytes, so lookup by ordinal is a
/// single seek, and lookup by id is a binary search over the second block
/// (O(log n) seeks).
///
/// Integers are stored in native byte order, so index files are not
/// portable between platforms of different endianness.
///
/// The stream has a single cursor, so it is only reachable through a lock;
/// every lookup holds the lock for its whole seek/read sequence.
pub struct StreamIndex<S> {
    stream: Mutex<S>,
    layout: Option<Layout>,
}

impl<S> std::fmt::Debug for StreamIndex<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.layout.map_or(0, |layout| layout.count);
        write!(f, "StreamIndex<len: {len}>")
    }
}

impl<S: Read + Write + Seek> StreamIndex<S> {
    /// Opens an index over a stream.
    ///
    /// If the stream already contains an index body, it is used as-is.
    /// Otherwise the index starts out empty.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn new(mut stream: S) -> crate::Result<Self> {
        let layout = Self::recover_layout(&mut stream)?;

        if let Some(layout) = &layout {
            log::debug!(
                "Opened stream index with {} entries (id width {})",
                layout.count,
                layout.codec.id_width()
            );
        }

        Ok(Self {
            stream: Mutex::new(stream),
            layout,
        })
    }

    fn recover_layout(stream: &mut S) -> crate::Result<Option<Layout>> {
        stream.seek(SeekFrom::Start(RESERVED_HEADER_SIZE as u64))?;

        let header = match LayoutHeader::decode_from(stream) {
            Ok(header) => header,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                log::trace!("Stream holds no index body, starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let Some(count) = header.entry_count() else {
            if header.body_length != 0 || header.id_width != 0 {
                log::warn!("Ignoring inconsistent stream index header: {header:?}");
            }
            return Ok(None);
        };

        Ok(Some(Layout {
            codec: RecordCodec::new(header.id_width),
            count,
        }))
    }

    /// Consumes the index, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream.into_inner().expect("lock is poisoned")
    }

    /// Returns the reserved header region, or `None` if the
    /// stream is too short to contain one.
    ///
    /// The contents are not interpreted by the index.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn reserved_header(&self) -> crate::Result<Option<[u8; RESERVED_HEADER_SIZE]>> {
        let mut stream = self.stream.lock().expect("lock is poisoned");
        stream.seek(SeekFrom::Start(0))?;

        let mut buf = [0; RESERVED_HEADER_SIZE];

        match stream.read_exact(&mut buf) {
            Ok(()) => Ok(Some(buf)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrites the reserved header region.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn write_reserved_header(&mut self, bytes: &[u8; RESERVED_HEADER_SIZE]) -> crate::Result<()> {
        let stream = self.stream.get_mut().expect("lock is poisoned");
        stream.seek(SeekFrom::Start(0))?;
        stream.write_all(bytes)?;
        stream.flush()?;
        Ok(())
    }

    fn check_entries(entries: &[Entry]) -> crate::Result<u64> {
        // NOTE: trailing padding is stripped on read
        if let Some(entry) = entries.iter().find(|e| e.id.ends_with(' ')) {
            return Err(Error::InvalidId(entry.id.clone()));
        }

        let Some(longest) = entries.iter().max_by_key(|e| e.id.len()) else {
            return Ok(1);
        };

        // NOTE: ids are space-terminated
        let id_width = longest.id.len() + 1;

        if id_width as u64 > MAX_ID_WIDTH {
            return Err(Error::IdTooLong {
                id: longest.id.clone(),
                length: id_width,
            });
        }

        Ok(id_width as u64)
    }

    /// Positions the stream in front of the layout header,
    /// zero-filling the reserved region if it does not exist yet.
    fn skip_reserved_header(stream: &mut S) -> crate::Result<()> {
        let stream_len = stream.seek(SeekFrom::End(0))?;
        let reserved = RESERVED_HEADER_SIZE as u64;

        if stream_len < reserved {
            std::io::copy(&mut std::io::repeat(0).take(reserved - stream_len), stream)?;
        } else {
            stream.seek(SeekFrom::Start(reserved))?;
        }

        Ok(())
    }
}

impl<S: Read + Write + Seek> Index for StreamIndex<S> {
    fn create(&mut self, mut entries: Vec<Entry>) -> crate::Result<()> {
        let id_width = Self::check_entries(&entries)?;
        let codec = RecordCodec::new(id_width);

        entries.sort_by(|a, b| a.ordinal.cmp(&b.ordinal));

        for (expected, entry) in (0u64..).zip(&entries) {
            if entry.ordinal != expected {
                return Err(Error::NonContiguousOrdinals {
                    expected,
                    found: entry.ordinal,
                });
            }
        }

        let count = entries.len() as u64;
        log::debug!("Writing stream index with {count} entries (id width {id_width})");

        let stream = self.stream.get_mut().expect("lock is poisoned");

        // NOTE: The old generation is unusable from here on
        self.layout = None;

        Self::skip_reserved_header(stream)?;

        let mut writer = BufWriter::new(&mut *stream);

        LayoutHeader::for_entries(count, id_width).encode_into(&mut writer)?;

        for entry in &entries {
            codec.encode_into(entry, &mut writer)?;
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));

        for entry in &entries {
            codec.encode_into(entry, &mut writer)?;
        }

        writer.flush()?;
        drop(writer);

        self.layout = Some(Layout { codec, count });

        Ok(())
    }

    fn len(&self) -> usize {
        // NOTE: count was derived from an in-memory Vec or fits the stream
        #[allow(clippy::cast_possible_truncation)]
        self.layout.map_or(0, |layout| layout.count as usize)
    }

    fn find_by_id(&self, id: &str) -> crate::Result<Option<Entry>> {
        let Some(layout) = self.layout else {
            return Ok(None);
        };

        let mut stream = self.stream.lock().expect("lock is poisoned");

        let mut cursor = BlockCursor::new(
            &mut *stream,
            layout.by_id_start(),
            layout.count,
            layout.codec,
        );
        let entry = cursor.find(id)?;

        log::trace!("Looked up id {id:?}: {entry:?}");

        Ok(entry)
    }

    fn find_by_ordinal(&self, ordinal: u64) -> crate::Result<Option<Entry>> {
        let Some(layout) = self.layout else {
            return Ok(None);
        };

        if ordinal >= layout.count {
            return Ok(None);
        }

        let offset = Layout::by_ordinal_start() + ordinal * layout.codec.record_size();

        let entry = {
            let mut stream = self.stream.lock().expect("lock is poisoned");
            stream.seek(SeekFrom::Start(offset))?;
            layout.codec.decode_from(&mut *stream)?
        };

        Ok(Some(entry))
    }
}
