mod common;

use seq_index::{Index, StreamIndex};
use std::fs::OpenOptions;
use test_log::test;

#[test]
fn stream_index_file_reopen() -> seq_index::Result<()> {
    let folder = tempfile::tempdir()?;
    let path = folder.path().join("proteins.fasta.index");

    let entries = common::protein_entries(250);

    let mut reserved = [0; 48];
    reserved
        .get_mut(..8)
        .expect("should exist")
        .copy_from_slice(&123_456u64.to_ne_bytes());

    {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        let mut index = StreamIndex::new(file)?;
        assert_eq!(0, index.len());

        index.write_reserved_header(&reserved)?;
        index.create(entries.clone())?;
    }

    {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let index = StreamIndex::new(file)?;

        assert_eq!(entries.len(), index.len());
        assert_eq!(Some(reserved), index.reserved_header()?);

        for entry in &entries {
            assert_eq!(Some(entry), index.find_by_id(&entry.id)?.as_ref());
            assert_eq!(Some(entry), index.find_by_ordinal(entry.ordinal)?.as_ref());
        }
    }

    {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let mut index = StreamIndex::new(file)?;
        index.create(entries.iter().take(5).cloned().collect())?;
    }

    {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let index = StreamIndex::new(file)?;

        assert_eq!(5, index.len());
        assert_eq!(None, index.find_by_id(&entries.last().expect("should exist").id)?);
        assert_eq!(Some(reserved), index.reserved_header()?);
    }

    Ok(())
}
