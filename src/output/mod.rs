//! Terminal output for search results, charts and histograms

pub mod histogram;
pub mod tree;

pub use histogram::{print_histogram, render_bars, run_termgraph, Bar, BAR_WIDTH};
pub use tree::{Label, TreeLine, TreeNode, MAX_TREE_DEPTH};

use crate::query::DisplayKind;
use crate::session::SearchHit;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Stdout stream, colored only when requested and attached to a terminal
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color && io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Column layout for tabular hits
#[derive(Debug, Clone, PartialEq)]
pub struct HitTable {
    pub title: String,
    pub headers: [&'static str; 3],
    pub colors: [Color; 3],
    pub rows: Vec<[String; 3]>,
}

impl HitTable {
    /// Rows for every hit that renders as a table.
    ///
    /// Key hits whose values are all scalars give one row per value; value
    /// hits give one row each with their keys joined by `, `. Returns `None`
    /// when no hit is tabular.
    pub fn from_hits(hits: &[SearchHit]) -> Option<Self> {
        let mut rows = Vec::new();
        let mut value_mode = false;

        for hit in hits {
            match hit {
                SearchHit::Key {
                    key,
                    score,
                    display: DisplayKind::Table,
                    values,
                } => {
                    for value in values {
                        let shown = value
                            .as_scalar()
                            .map(|s| s.to_string())
                            .unwrap_or_default();
                        rows.push([key.clone(), shown, format_score(*score)]);
                    }
                }
                SearchHit::Key { .. } => {}
                SearchHit::Value { value, score, keys } => {
                    value_mode = true;
                    rows.push([value.clone(), keys.join(", "), format_score(*score)]);
                }
            }
        }

        if rows.is_empty() {
            return None;
        }

        let (headers, colors) = if value_mode {
            (["Value", "Keys", "Score"], [Color::Magenta, Color::Cyan, Color::Green])
        } else {
            (["Key", "Value", "Score"], [Color::Cyan, Color::Magenta, Color::Green])
        };

        Some(Self {
            title: format!("Fuzzy Search Results ({} total)", hits.len()),
            headers,
            colors,
            rows,
        })
    }

    /// Display width of each column
    pub fn widths(&self) -> [usize; 3] {
        let mut widths = self.headers.map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

/// Trees for key hits with composite values
pub fn hit_trees(hits: &[SearchHit], item_limit: usize) -> Vec<TreeNode> {
    hits.iter()
        .filter_map(|hit| match hit {
            SearchHit::Key {
                key,
                score,
                display: DisplayKind::Tree,
                values,
            } => Some(TreeNode::for_hit(key, *score, values, item_limit)),
            _ => None,
        })
        .collect()
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Print hits as a table followed by trees
pub fn print_hits<W: WriteColor>(
    out: &mut W,
    hits: &[SearchHit],
    item_limit: usize,
) -> io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No matches found.")?;
        return Ok(());
    }

    if let Some(table) = HitTable::from_hits(hits) {
        print_table(out, &table)?;
    }
    for tree in hit_trees(hits, item_limit) {
        print_tree(out, &tree)?;
    }
    Ok(())
}

fn print_table<W: WriteColor>(out: &mut W, table: &HitTable) -> io::Result<()> {
    let widths = table.widths();

    out.set_color(ColorSpec::new().set_italic(true))?;
    writeln!(out, "{}", table.title)?;
    out.reset()?;

    out.set_color(ColorSpec::new().set_bold(true))?;
    for (i, header) in table.headers.iter().enumerate() {
        write!(out, "{:<width$}", header, width = widths[i])?;
        if i < 2 {
            write!(out, "  ")?;
        }
    }
    writeln!(out)?;
    out.reset()?;

    let rule: usize = widths.iter().sum::<usize>() + 4;
    writeln!(out, "{}", "─".repeat(rule))?;

    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            out.set_color(ColorSpec::new().set_fg(Some(table.colors[i])))?;
            if i < 2 {
                write!(out, "{:<width$}", cell, width = widths[i])?;
                out.reset()?;
                write!(out, "  ")?;
            } else {
                write!(out, "{}", cell)?;
                out.reset()?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Print a tree with colored labels
pub fn print_tree<W: WriteColor>(out: &mut W, tree: &TreeNode) -> io::Result<()> {
    for line in tree.lines() {
        write!(out, "{}", line.guide)?;
        match line.label {
            Label::Name(name) => {
                out.set_color(ColorSpec::new().set_bold(true))?;
                write!(out, "{}", name)?;
            }
            Label::Field { key, value } => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                write!(out, "{}", key)?;
                out.reset()?;
                write!(out, ": ")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "{}", value)?;
            }
            Label::Item(value) => {
                write!(out, "- ")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "{}", value)?;
            }
            Label::Scalar(value) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "{}", value)?;
            }
            other => {
                out.set_color(ColorSpec::new().set_dimmed(true))?;
                write!(out, "{}", other.plain())?;
            }
        }
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print hits as a JSON array
pub fn print_hits_json<W: Write>(out: &mut W, hits: &[SearchHit]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, hits)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::session::Session;
    use serde_json::json;
    use termcolor::NoColor;

    fn session() -> Session {
        let mut s = Session::default();
        s.replace_document(
            Document::from_json_value(json!({"user": {"name": "Alice", "tags": ["admin", "vip"]}})),
            None,
        );
        s
    }

    fn printed(hits: &[SearchHit]) -> String {
        let mut out = NoColor::new(Vec::new());
        print_hits(&mut out, hits, 5).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_key_table_has_row_per_value() {
        let s = session();
        let hits = s.search("tags");
        let table = HitTable::from_hits(&hits).unwrap();
        assert_eq!(table.headers, ["Key", "Value", "Score"]);
        assert_eq!(
            table.rows[..2],
            [
                ["user.tags".to_string(), "admin".to_string(), "90.0".to_string()],
                ["user.tags".to_string(), "vip".to_string(), "90.0".to_string()],
            ]
        );
    }

    #[test]
    fn test_value_table_joins_keys() {
        let mut s = Session::default();
        s.replace_document(
            Document::from_json_value(json!({"a": "x", "b": {"c": "x"}})),
            None,
        );
        s.toggle_mode();
        let table = HitTable::from_hits(&s.search("x")).unwrap();
        assert_eq!(table.headers, ["Value", "Keys", "Score"]);
        assert_eq!(table.rows[0][1], "a, b.c");
    }

    #[test]
    fn test_composite_hit_prints_tree() {
        let s = session();
        let text = printed(&s.search("user"));
        assert!(text.contains("Values for 'user' (Score: 100.0)"));
        assert!(text.contains("name: Alice"));
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(printed(&[]), "No matches found.\n");
    }

    #[test]
    fn test_json_output() {
        let s = session();
        let mut out = Vec::new();
        print_hits_json(&mut out, &s.search("nam")).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["kind"], "key");
        assert_eq!(parsed[0]["key"], "user.name");
        assert_eq!(parsed[0]["display"], "table");
        assert_eq!(parsed[0]["values"], json!(["Alice"]));
    }
}
