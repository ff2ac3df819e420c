use seq_index::{Entry, Record, RecordList};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Entries as a FASTA scan would produce them (ordinal order)
#[allow(unused)]
pub fn protein_entries(n: u64) -> Vec<Entry> {
    (0..n)
        .map(|ordinal| Entry::new(format!("sp|P{ordinal:05}|PROT{ordinal}"), ordinal, ordinal * 137))
        .collect()
}

/// Counts calls into the wrapped record list
#[allow(unused)]
pub struct CountingRecordList<L> {
    pub inner: L,
    pub gets: AtomicUsize,
    pub finds: AtomicUsize,
}

#[allow(unused)]
impl<L> CountingRecordList<L> {
    pub fn new(inner: L) -> Arc<Self> {
        Arc::new(Self {
            inner,
            gets: AtomicUsize::default(),
            finds: AtomicUsize::default(),
        })
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

impl<L: RecordList> RecordList for CountingRecordList<L> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn find(&self, id: &str) -> seq_index::Result<Option<usize>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(id)
    }

    fn get(&self, ordinal: usize, with_sequence: bool) -> seq_index::Result<Arc<Record>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(ordinal, with_sequence)
    }
}
