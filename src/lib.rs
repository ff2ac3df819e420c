// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Random-access lookup into large flat-file sequence databases.
//!
//! Scanning a multi-million entry FASTA file once is affordable, scanning it
//! for every query is not. This crate offers two complementary building blocks:
//!
//! - [`StreamIndex`], a persistent sorted index that lives inside any seekable
//!   byte stream and maps a record id or ordinal to the record's byte offset
//!   in the data file, without ever loading the index into memory:
//!
//! [reserved header][body length][id width][records by ordinal][records by id]
//!
//! Ordinal lookups are a single seek, id lookups are a binary search
//! performed directly on the stream.
//!
//! - [`RecordListCache`], a bounded most-recently-used cache in front of any
//!   [`RecordList`] that keeps either full records or metadata-only
//!   projections of "hot" records, depending on its [`CacheMode`].
//!
//! An index is built once by a producer that scans the data file
//! ([`Index::create`]); afterwards many readers can look up entries concurrently.

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]
#![deny(clippy::unwrap_used, clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]

pub mod coding;
mod config;
mod entry;
mod error;
mod index;
mod mock;
mod record;
mod record_cache;
mod stream_index;

pub use {
    config::Config,
    entry::Entry,
    error::{Error, Result},
    index::Index,
    record::{Record, RecordList},
    record_cache::{CacheMode, RecordListCache},
    stream_index::StreamIndex,
};

#[doc(hidden)]
pub use mock::MemoryRecordList;
