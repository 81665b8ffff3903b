//! In-memory holder of the currently displayed record set.
//!
//! The store keeps exactly one sequence of records in provider order. It is
//! replaced wholesale on every successful load and never merged.

use crate::types::{ALL_GENRES, MovieRecord};

#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    records: Vec<MovieRecord>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous sequence and install `records`.
    ///
    /// Records with `found = false` are dropped on the way in.
    pub fn replace_all(&mut self, records: Vec<MovieRecord>) {
        self.records = records.into_iter().filter(|r| r.found).collect();
    }

    pub fn current(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Records whose genre list contains `genre` exactly, in stored order.
    ///
    /// `"all"` returns the whole sequence.
    pub fn filter_by_genre(&self, genre: &str) -> Vec<MovieRecord> {
        if genre == ALL_GENRES {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|r| r.has_genre(genre))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&MovieRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
