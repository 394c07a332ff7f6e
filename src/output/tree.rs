//! Tree view of nested values, shared by the terminal printer and the TUI

use crate::document::Value;

/// Nesting below this depth is elided
pub const MAX_TREE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// A map key or array index heading a subtree
    Name(String),
    /// `key: value` for a scalar map entry
    Field { key: String, value: String },
    /// `- value` for a scalar sequence item
    Item(String),
    /// A bare scalar
    Scalar(String),
    /// Sequence items beyond the item limit
    More(usize),
    /// Nesting beyond [`MAX_TREE_DEPTH`]
    Elided,
}

impl Label {
    pub fn plain(&self) -> String {
        match self {
            Label::Name(name) => name.clone(),
            Label::Field { key, value } => format!("{}: {}", key, value),
            Label::Item(value) => format!("- {}", value),
            Label::Scalar(value) => value.clone(),
            Label::More(n) => format!("... {} more", n),
            Label::Elided => "...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: Label,
    pub children: Vec<TreeNode>,
}

/// One rendered row: box-drawing guide plus label
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine<'a> {
    pub guide: String,
    pub label: &'a Label,
}

impl TreeNode {
    pub fn leaf(label: Label) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    /// Tree for `value` titled `name`; sequences show at most `item_limit` items
    pub fn from_value(name: impl Into<String>, value: &Value, item_limit: usize) -> Self {
        Self {
            label: Label::Name(name.into()),
            children: children_of(value, item_limit, 0),
        }
    }

    /// Tree for one key-mode hit: composites become subtrees titled with
    /// the key, scalars become plain leaves.
    pub fn for_hit(key: &str, score: f64, values: &[Value], item_limit: usize) -> Self {
        let children = values
            .iter()
            .map(|value| match value {
                Value::Scalar(s) => TreeNode::leaf(Label::Scalar(s.to_string())),
                composite => TreeNode::from_value(key, composite, item_limit),
            })
            .collect();
        Self {
            label: Label::Name(format!("Values for '{}' (Score: {:.1})", key, score)),
            children,
        }
    }

    /// Flatten to display rows, depth-first
    pub fn lines(&self) -> Vec<TreeLine<'_>> {
        let mut out = Vec::new();
        // (node, guide for this row, guide for its children)
        let mut stack: Vec<(&TreeNode, String, String)> =
            vec![(self, String::new(), String::new())];

        while let Some((node, guide, child_prefix)) = stack.pop() {
            out.push(TreeLine {
                guide,
                label: &node.label,
            });
            let last = node.children.len().saturating_sub(1);
            for (i, child) in node.children.iter().enumerate().rev() {
                let (branch, indent) = if i == last {
                    ("└── ", "    ")
                } else {
                    ("├── ", "│   ")
                };
                stack.push((
                    child,
                    format!("{}{}", child_prefix, branch),
                    format!("{}{}", child_prefix, indent),
                ));
            }
        }
        out
    }

    /// Rows as plain text
    pub fn render(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|line| format!("{}{}", line.guide, line.label.plain()))
            .collect()
    }
}

fn children_of(value: &Value, item_limit: usize, depth: usize) -> Vec<TreeNode> {
    if depth >= MAX_TREE_DEPTH {
        return vec![TreeNode::leaf(Label::Elided)];
    }
    match value {
        Value::Scalar(s) => vec![TreeNode::leaf(Label::Scalar(s.to_string()))],
        Value::Map(entries) => entries
            .iter()
            .map(|(key, child)| match child {
                Value::Scalar(s) => TreeNode::leaf(Label::Field {
                    key: key.clone(),
                    value: s.to_string(),
                }),
                composite => TreeNode {
                    label: Label::Name(key.clone()),
                    children: children_of(composite, item_limit, depth + 1),
                },
            })
            .collect(),
        Value::Sequence(items) => {
            let mut nodes: Vec<TreeNode> = items
                .iter()
                .take(item_limit)
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Scalar(s) => TreeNode::leaf(Label::Item(s.to_string())),
                    composite => TreeNode {
                        label: Label::Name(format!("[{}]", i)),
                        children: children_of(composite, item_limit, depth + 1),
                    },
                })
                .collect();
            if items.len() > item_limit {
                nodes.push(TreeNode::leaf(Label::More(items.len() - item_limit)));
            }
            nodes
        }
    }
}
