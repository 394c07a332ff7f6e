//! Bar charts of occurrence counts

use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::process::Command;
use termcolor::{Color, ColorSpec, WriteColor};
use tracing::debug;

pub const BAR_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    /// Cells filled, scaled against the largest count
    pub len: usize,
}

/// Scale counts to bars at most `width` cells wide. Non-zero counts
/// always get at least one cell.
pub fn render_bars(entries: &[(String, usize)], width: usize) -> Vec<Bar> {
    let max = entries.iter().map(|(_, c)| *c).max().unwrap_or(0);
    entries
        .iter()
        .map(|(label, count)| {
            let len = if max == 0 {
                0
            } else {
                ((*count * width) / max).max(usize::from(*count > 0))
            };
            Bar {
                label: label.clone(),
                count: *count,
                len,
            }
        })
        .collect()
}

/// Built-in renderer
pub fn print_histogram<W: WriteColor>(
    out: &mut W,
    entries: &[(String, usize)],
    color: Color,
) -> io::Result<()> {
    let bars = render_bars(entries, BAR_WIDTH);
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

    for bar in &bars {
        write!(out, "{:>width$}: ", bar.label, width = label_width)?;
        out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(out, "{}", "▇".repeat(bar.len))?;
        out.reset()?;
        writeln!(out, " {:<5.2}", bar.count as f64)?;
    }
    Ok(())
}

/// Render through the external `termgraph` program.
///
/// Entries are written as `label,count` lines to a temporary file which
/// is removed when this returns.
pub fn run_termgraph(entries: &[(String, usize)], color: &str) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix("jsift-hist-")
        .suffix(".csv")
        .tempfile()
        .context("Failed to create histogram data file")?;
    for (label, count) in entries {
        writeln!(file, "{},{}", label, count)?;
    }
    file.flush()?;

    debug!(path = %file.path().display(), color, "running termgraph");
    let status = Command::new("termgraph")
        .arg(file.path())
        .args(["--width", "50", "--format", "{:<5.2f}", "--suffix", "", "--color", color])
        .status()
        .context("Failed to run termgraph")?;

    if !status.success() {
        bail!("termgraph exited with {}", status);
    }
    Ok(())
}
