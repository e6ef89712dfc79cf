use std::collections::VecDeque;

/// Entries kept before the oldest are dropped.
pub const JOURNAL_CAPACITY: usize = 256;

/// One traced session transition, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub seq: u64,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded record of recent session transitions, for replay checks and the CLI.
///
/// Holds at most `capacity` entries; `seq` keeps counting across drops and drains.
#[derive(Debug)]
pub struct Journal {
    next_seq: u64,
    capacity: usize,
    entries: VecDeque<JournalEntry>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(JOURNAL_CAPACITY)
    }
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            next_seq: 0,
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(JournalEntry {
            seq,
            kind,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> + '_ {
        self.entries.iter()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    pub fn drain(&mut self) -> Vec<JournalEntry> {
        self.entries.drain(..).collect()
    }
}
