use seq_index::{
    CacheMode, Config, Entry, Error, Index, Record, RecordList, RecordListCache, StreamIndex,
};
use std::{io::Cursor, sync::Arc};
use test_log::test;

/// Minimal FASTA-backed record list: the text lives in memory,
/// record positions come from a stream index
struct IndexedFasta {
    text: String,
    index: StreamIndex<Cursor<Vec<u8>>>,
}

impl IndexedFasta {
    fn build(records: &[(&str, &str, &str)]) -> seq_index::Result<Self> {
        let mut text = String::new();
        let mut entries = vec![];

        for (ordinal, (id, description, sequence)) in records.iter().enumerate() {
            entries.push(Entry::new(*id, ordinal as u64, text.len() as u64));

            text.push_str(&format!(">{id} {description}\n"));

            for line in sequence.as_bytes().chunks(10) {
                text.push_str(std::str::from_utf8(line).expect("should be ASCII"));
                text.push('\n');
            }
        }

        let mut index = StreamIndex::new(Cursor::new(vec![]))?;
        index.create(entries)?;

        Ok(Self { text, index })
    }
}

impl RecordList for IndexedFasta {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn find(&self, id: &str) -> seq_index::Result<Option<usize>> {
        Ok(self
            .index
            .find_by_id(id)?
            .map(|entry| entry.ordinal as usize))
    }

    fn get(&self, ordinal: usize, with_sequence: bool) -> seq_index::Result<Arc<Record>> {
        let entry = self
            .index
            .find_by_ordinal(ordinal as u64)?
            .ok_or(Error::OrdinalOutOfRange {
                ordinal,
                len: self.len(),
            })?;

        let rest = self.text.get(entry.offset as usize..).expect("offset in range");
        let mut lines = rest.lines();

        let header = lines.next().expect("header line").trim_start_matches('>');
        let (id, description) = header.split_once(' ').unwrap_or((header, ""));

        let sequence = if with_sequence {
            lines.take_while(|line| !line.starts_with('>')).collect::<String>()
        } else {
            String::new()
        };

        Ok(Arc::new(Record::new(ordinal, id, description, sequence)))
    }
}

const PROTEINS: &[(&str, &str, &str)] = &[
    ("sp|P02768|ALBU_HUMAN", "Serum albumin", "MKWVTFISLLFLFSSAYSRGVFRRDAHKSEVAHRFKDLGEENFKALVLIAFAQYLQQCPFEDHVKLVNEVTEFAKTCVADESAENCDKS"),
    ("sp|P69905|HBA_HUMAN", "Hemoglobin subunit alpha", "MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF"),
    ("sp|P68871|HBB_HUMAN", "Hemoglobin subunit beta", "MVHLTPEEKSAVTALWGKVNVDEVGGEALGRLLVVYPWTQRFFESFGDLSTPDAVMGNPKVKAHGKKVLGAFSDGLAHLDNLKGTFATLSELHCDKLHVDPENFRLLGNVLVCVLAHHFGKEFTPPVQAAYQKVVAGVANALAHKYH"),
    ("sp|P01308|INS_HUMAN", "Insulin", "MALWMRLLPLLALLALWGPDPAAAFVNQHLCGSHLVEALYLVCGERGFFYTPKTRREAEDLQVGQVELGGGPGAGSLQPLALEGSLQKRGIVEQCCTSICSLYQLENYCN"),
];

#[test]
fn indexed_fasta_random_access() -> seq_index::Result<()> {
    let fasta = IndexedFasta::build(PROTEINS)?;

    assert_eq!(PROTEINS.len(), fasta.len());

    for (ordinal, (id, description, sequence)) in PROTEINS.iter().enumerate() {
        assert_eq!(Some(ordinal), fasta.find(id)?);

        let record = fasta.get(ordinal, true)?;
        assert_eq!(*id, record.id);
        assert_eq!(*description, record.description);
        assert_eq!(*sequence, record.sequence);
    }

    assert_eq!(None, fasta.find("sp|P00000|NONE_HUMAN")?);

    Ok(())
}

#[test]
fn indexed_fasta_behind_cache() -> seq_index::Result<()> {
    let cache = RecordListCache::new(
        IndexedFasta::build(PROTEINS)?,
        Config::new(2).mode(CacheMode::MetadataAndSequence),
    );

    let ordinal = cache.find("sp|P01308|INS_HUMAN")?.expect("should exist");
    assert_eq!(3, ordinal);

    let first = cache.get(ordinal, true)?;
    let second = cache.get(ordinal, true)?;
    assert!(Arc::ptr_eq(&first, &second));

    let (_, _, sequence) = PROTEINS.get(3).expect("should exist");
    assert_eq!(*sequence, second.sequence);

    cache.set_mode(CacheMode::MetadataOnly);
    let metadata = cache.get(0, false)?;
    assert_eq!("Serum albumin", metadata.description);
    assert!(metadata.sequence.is_empty());
    assert_eq!(vec![0], cache.cached_ordinals());

    Ok(())
}
