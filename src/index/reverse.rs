//! Scalar -> key-path index

use crate::document::Document;
use crate::index::flatten::{walk, Visit};
use crate::index::types::KeyPath;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Maps each stringified scalar to the sorted set of key-paths that hold
/// it anywhere in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseIndex {
    entries: FxHashMap<String, BTreeSet<KeyPath>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `scalar` under `key`. Repeat occurrences are merged.
    pub fn insert(&mut self, scalar: String, key: &str) {
        let keys = self.entries.entry(scalar).or_default();
        if !keys.contains(key) {
            keys.insert(key.to_string());
        }
    }

    pub(crate) fn insert_set(&mut self, scalar: String, keys: BTreeSet<KeyPath>) {
        self.entries.insert(scalar, keys);
    }

    pub fn get(&self, scalar: &str) -> Option<&BTreeSet<KeyPath>> {
        self.entries.get(scalar)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<KeyPath>)> {
        self.entries.iter()
    }

    /// Sorted distinct scalars
    pub fn sorted_values(&self) -> Vec<String> {
        let mut values: Vec<String> = self.entries.keys().cloned().collect();
        values.sort();
        values
    }

    /// Every key-path referenced by any entry
    pub fn key_union(&self) -> BTreeSet<KeyPath> {
        self.entries.values().flatten().cloned().collect()
    }
}

/// Walk the document and record every scalar against its current key-path
pub fn build_value_index(doc: &Document) -> ReverseIndex {
    let mut index = ReverseIndex::new();
    walk(doc.root(), |visit| {
        if let Visit::Leaf { path, scalar } = visit {
            index.insert(scalar.to_string(), path);
        }
    });
    index
}
