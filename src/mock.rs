use crate::{Error, Record, RecordList};
use std::{collections::HashMap, sync::Arc};

/// In-memory record list
///
/// Used for tests only
#[derive(Clone, Debug, Default)]
pub struct MemoryRecordList {
    records: Vec<Record>,
    ordinals: HashMap<String, usize>,
}

impl MemoryRecordList {
    /// Creates a record list; record ordinals are reassigned to their position.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        records.into_iter().collect()
    }
}

impl FromIterator<Record> for MemoryRecordList {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let mut list = Self::default();

        for (ordinal, mut record) in iter.into_iter().enumerate() {
            record.ordinal = ordinal;
            list.ordinals.insert(record.id.clone(), ordinal);
            list.records.push(record);
        }

        list
    }
}

impl RecordList for MemoryRecordList {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn find(&self, id: &str) -> crate::Result<Option<usize>> {
        Ok(self.ordinals.get(id).copied())
    }

    fn get(&self, ordinal: usize, with_sequence: bool) -> crate::Result<Arc<Record>> {
        let record = self
            .records
            .get(ordinal)
            .ok_or(Error::OrdinalOutOfRange {
                ordinal,
                len: self.records.len(),
            })?;

        if with_sequence {
            Ok(Arc::new(record.clone()))
        } else {
            Ok(Arc::new(record.metadata_only()))
        }
    }
}
