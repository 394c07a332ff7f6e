//! Key-path resolution against a document

use crate::document::Value;
use serde::Serialize;

/// How a key-mode match should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    /// Every resolved value is a scalar: one table row per value
    Table,
    /// At least one resolved value is a map or sequence
    Tree,
}

/// Values found at a key-path
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub values: Vec<&'a Value>,
}

impl<'a> Resolved<'a> {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_composite(&self) -> bool {
        self.values.iter().any(|v| v.is_composite())
    }

    /// Any composite routes the whole match to tree rendering, so mixed
    /// scalar/composite results are never split across table and tree.
    pub fn display_kind(&self) -> DisplayKind {
        if self.has_composite() {
            DisplayKind::Tree
        } else {
            DisplayKind::Table
        }
    }
}

/// Every value living at `key_path`.
///
/// Map keys may themselves contain dots, so a map entry matches when its
/// whole key equals the rest of the path or is followed by `.` in it.
/// Whenever the current node is a sequence, each element is resolved
/// against the same remaining path and the results concatenated, so a
/// path that crosses sequences can yield many values. A sequence at the
/// end of the path is expanded the same way, except an empty sequence,
/// which is returned as itself. Missing keys and lookups into scalars
/// yield nothing for that branch. `null` is a value and is kept.
pub fn resolve<'a>(root: &'a Value, key_path: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    // (node, unconsumed rest of the path; `None` once fully consumed)
    let mut stack: Vec<(&'a Value, Option<&str>)> = vec![(root, Some(key_path))];

    while let Some((node, rest)) = stack.pop() {
        match (node, rest) {
            (Value::Sequence(items), _) => {
                if items.is_empty() && rest.is_none() {
                    found.push(node);
                }
                for item in items.iter().rev() {
                    stack.push((item, rest));
                }
            }
            (_, None) => found.push(node),
            (Value::Map(entries), Some(rest)) => {
                for (key, child) in entries.iter().rev() {
                    if let Some(next) = consume_key(rest, key) {
                        stack.push((child, next));
                    }
                }
            }
            (Value::Scalar(_), Some(_)) => {}
        }
    }

    found
}

/// `Some(None)` when `key` is all of `rest`, `Some(Some(tail))` when
/// `rest` is `key.tail`
fn consume_key<'p>(rest: &'p str, key: &str) -> Option<Option<&'p str>> {
    let tail = rest.strip_prefix(key)?;
    if tail.is_empty() {
        Some(None)
    } else {
        tail.strip_prefix('.').map(Some)
    }
}

/// [`resolve`] wrapped with display classification
pub fn resolve_for_display<'a>(root: &'a Value, key_path: &str) -> Resolved<'a> {
    Resolved {
        values: resolve(root, key_path),
    }
}
