use std::collections::HashMap;

/// One FASTA record: identifier and concatenated residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Contigs of a single assembly, keyed by identifier, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    records: Vec<SequenceRecord>,
    index: HashMap<String, usize>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a contig. A repeated identifier overwrites the earlier sequence
    /// in place and returns it.
    pub fn insert(&mut self, id: String, sequence: Vec<u8>) -> Option<Vec<u8>> {
        if let Some(&pos) = self.index.get(&id) {
            return Some(std::mem::replace(&mut self.records[pos].sequence, sequence));
        }
        self.index.insert(id.clone(), self.records.len());
        self.records.push(SequenceRecord { id, sequence });
        None
    }

    pub fn get(&self, id: &str) -> Option<&[u8]> {
        self.index
            .get(id)
            .map(|&pos| self.records[pos].sequence.as_slice())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.records.iter()
    }

    pub fn sequences(&self) -> impl Iterator<Item = &[u8]> {
        self.records.iter().map(|r| r.sequence.as_slice())
    }
}

impl<S: Into<String>, Q: Into<Vec<u8>>> FromIterator<(S, Q)> for Assembly {
    fn from_iter<I: IntoIterator<Item = (S, Q)>>(iter: I) -> Self {
        let mut assembly = Assembly::new();
        for (id, seq) in iter {
            assembly.insert(id.into(), seq.into());
        }
        assembly
    }
}
