//! Line-based front end for pipes and dumb terminals

use crate::output;
use crate::session::{Command, Outcome, Session};
use std::io::{self, BufRead, Write};
use termcolor::{Color, ColorSpec, WriteColor};

pub fn prompt(session: &Session) -> String {
    let name = session
        .source()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "no file".to_string());
    format!("[{}] Search> ", name)
}

/// Read commands from `input` until `/exit` or end of input
pub fn run<R: BufRead, W: WriteColor>(
    session: &mut Session,
    input: R,
    out: &mut W,
    tree_item_limit: usize,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{}", prompt(session))?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match session.dispatch(Command::parse(&line)) {
            Outcome::Idle => {}
            Outcome::Exit => break,
            Outcome::Hits { hits, .. } => output::print_hits(out, &hits, tree_item_limit)?,
            Outcome::Info(text) => writeln!(out, "{}", text)?,
            Outcome::Error(text) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "{}", text)?;
                out.reset()?;
            }
        }
    }
    Ok(())
}
