//! Document traversal.
//!
//! Map keys extend the dot-path; sequence elements share their
//! container's path. The walk uses an explicit work stack so arbitrarily
//! deep documents do not grow the call stack.

use crate::document::{Document, Scalar, Value};
use crate::index::types::KeyPath;

/// A step of the traversal, in document order
#[derive(Debug)]
pub enum Visit<'a, 'p> {
    /// A map entry was entered; `path` is its full dot-path
    Key { path: &'p str, value: &'a Value },
    /// A scalar living under some map entry
    Leaf { path: &'p str, scalar: &'a Scalar },
}

enum Frame<'a> {
    /// A node whose children still need visiting; `prefix` is `None`
    /// outside every map entry
    Node {
        value: &'a Value,
        prefix: Option<String>,
    },
    /// A map entry to announce before descending
    Entry { path: String, value: &'a Value },
}

/// Pre-order traversal of `root`.
///
/// Scalars with no enclosing key (a bare top-level scalar, or scalar
/// items of a top-level sequence) have no path and are not reported.
pub fn walk<'a, F>(root: &'a Value, mut visit: F)
where
    F: FnMut(Visit<'a, '_>),
{
    let mut stack = vec![Frame::Node {
        value: root,
        prefix: None,
    }];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Entry { path, value } => {
                visit(Visit::Key { path: &path, value });
                stack.push(Frame::Node {
                    value,
                    prefix: Some(path),
                });
            }
            Frame::Node { value, prefix } => match value {
                Value::Map(entries) => {
                    for (key, child) in entries.iter().rev() {
                        stack.push(Frame::Entry {
                            path: join_path(prefix.as_deref(), key),
                            value: child,
                        });
                    }
                }
                Value::Sequence(items) => {
                    for item in items.iter().rev() {
                        stack.push(Frame::Node {
                            value: item,
                            prefix: prefix.clone(),
                        });
                    }
                }
                Value::Scalar(scalar) => {
                    if let Some(path) = &prefix {
                        visit(Visit::Leaf { path, scalar });
                    }
                }
            },
        }
    }
}

/// Keys are joined verbatim: an empty key still adds a segment, so
/// `{"": {"a": 1}}` yields `""` and `".a"`.
pub fn join_path(prefix: Option<&str>, key: &str) -> KeyPath {
    match prefix {
        Some(prefix) => format!("{}.{}", prefix, key),
        None => key.to_string(),
    }
}

/// Every key-path encountered, with duplicates, in traversal order
pub fn flatten_keys(doc: &Document) -> Vec<KeyPath> {
    let mut keys = Vec::new();
    walk(doc.root(), |visit| {
        if let Visit::Key { path, .. } = visit {
            keys.push(path.to_string());
        }
    });
    keys
}

/// Every scalar leaf, stringified, with duplicates, in traversal order
pub fn flatten_values(doc: &Document) -> Vec<String> {
    let mut values = Vec::new();
    walk(doc.root(), |visit| {
        if let Visit::Leaf { scalar, .. } = visit {
            values.push(scalar.to_string());
        }
    });
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from_json_value(value)
    }

    #[test]
    fn test_flatten_keys_user_document() {
        let d = doc(json!({"user": {"name": "Alice", "tags": ["admin", "vip"]}}));
        assert_eq!(flatten_keys(&d), vec!["user", "user.name", "user.tags"]);
        assert_eq!(flatten_values(&d), vec!["Alice", "admin", "vip"]);
    }

    #[test]
    fn test_sequence_elements_share_container_path() {
        let d = doc(json!({"a": [{"b": 1}, {"b": 2}]}));
        assert_eq!(flatten_keys(&d), vec!["a", "a.b", "a.b"]);
        assert_eq!(flatten_values(&d), vec!["1", "2"]);
    }

    #[test]
    fn test_containers_are_not_values() {
        let d = doc(json!({"a": {}, "b": [], "c": [[1, 2], {"d": null}]}));
        assert_eq!(flatten_keys(&d), vec!["a", "b", "c", "c.d"]);
        assert_eq!(flatten_values(&d), vec!["1", "2", "null"]);
    }

    #[test]
    fn test_top_level_scalars_have_no_path() {
        assert!(flatten_values(&doc(json!([1, 2, 3]))).is_empty());
        assert!(flatten_keys(&doc(json!("just a string"))).is_empty());
    }

    #[test]
    fn test_empty_documents() {
        assert!(flatten_keys(&doc(json!({}))).is_empty());
        assert!(flatten_values(&doc(json!([]))).is_empty());
    }

    #[test]
    fn test_csv_records() {
        let d = Document::from_csv_reader("name,city\nAlice,Oslo\nBob,Rome\n".as_bytes()).unwrap();
        assert_eq!(flatten_keys(&d), vec!["name", "city", "name", "city"]);
        assert_eq!(flatten_values(&d), vec!["Alice", "Oslo", "Bob", "Rome"]);
    }

    #[test]
    fn test_dotted_keys_are_kept_whole() {
        let d = doc(json!({"com.example": {"port": 8080}}));
        assert_eq!(flatten_keys(&d), vec!["com.example", "com.example.port"]);
        assert_eq!(flatten_values(&d), vec!["8080"]);
    }

    #[test]
    fn test_empty_key_has_a_path() {
        let d = doc(json!({"": 1, "x": {"": {"y": true}}}));
        assert_eq!(flatten_keys(&d), vec!["", "x", "x.", "x..y"]);
        assert_eq!(flatten_values(&d), vec!["1", "true"]);
    }

    #[test]
    fn test_deep_nesting_uses_no_recursion() {
        const DEPTH: usize = 1000;
        let mut value = Value::string("bottom");
        for _ in 0..DEPTH {
            value = Value::Sequence(vec![Value::Map(vec![("k".into(), value)])]);
        }
        let d = Document::new(crate::document::Format::Json, value);

        let keys = flatten_keys(&d);
        assert_eq!(keys.len(), DEPTH);
        assert_eq!(keys.last().map(|k| k.split('.').count()), Some(DEPTH));
        assert_eq!(flatten_values(&d), vec!["bottom"]);
    }
}
