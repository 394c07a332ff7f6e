use crate::document::Document;
use crate::index::filter::{apply_filter, KeyFilter};
use crate::index::flatten::{flatten_keys, flatten_values};
use crate::index::reverse::{build_value_index, ReverseIndex};

/// Dot-joined map keys. Sequence elements do not add a segment.
pub type KeyPath = String;

/// Unfiltered derivations of a document, kept so filter changes can be
/// recomputed without walking the document again.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Every key-path in traversal order, with duplicates
    pub all_keys: Vec<KeyPath>,
    /// Every stringified scalar in traversal order, with duplicates
    pub all_values: Vec<String>,
    /// Scalar -> key-paths holding it, before filtering
    pub value_index: ReverseIndex,
}

impl Corpus {
    pub fn build(doc: &Document) -> Self {
        Self {
            all_keys: flatten_keys(doc),
            all_values: flatten_values(doc),
            value_index: build_value_index(doc),
        }
    }

    /// Derive the searchable universe under `filter`
    pub fn universe(&self, filter: &KeyFilter) -> Universe {
        apply_filter(&self.all_keys, &self.value_index, filter)
    }
}

/// The searchable key and value sets after filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Universe {
    /// Distinct key-paths, sorted
    pub keys: Vec<KeyPath>,
    /// Distinct scalars that still have a surviving key, sorted
    pub values: Vec<String>,
    /// Scalar -> surviving key-paths
    pub reverse: ReverseIndex,
}

impl Universe {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.binary_search_by(|k| k.as_str().cmp(key)).is_ok()
    }
}
