//! Input line parsing

use crate::index::KeyFilter;
use std::path::PathBuf;

/// Commands offered for completion
pub const COMMANDS: &[&str] = &["/exit", "/load", "/mode", "/only", "/open", "/quit"];

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blank input
    Empty,
    /// Anything not starting with `/`
    Search(String),
    /// `/load <path>` or `/open <path>`
    Load(PathBuf),
    /// `/only p1,p2` sets the filter, bare `/only` clears it
    Only(KeyFilter),
    /// `/mode` toggles between key and value search
    Mode,
    /// `/exit` or `/quit`
    Exit,
    /// A known command used without its required argument
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        if line.trim().is_empty() {
            return Command::Empty;
        }
        if !line.starts_with('/') {
            return Command::Search(line.to_string());
        }

        let line = line.trim_end();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "/exit" | "/quit" => Command::Exit,
            "/load" | "/open" if arg.is_empty() => Command::Usage("/load <file_path>"),
            "/load" | "/open" => Command::Load(PathBuf::from(arg)),
            "/only" => Command::Only(KeyFilter::parse(arg)),
            "/mode" => Command::Mode,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Commands starting with `prefix`
pub fn complete_command(prefix: &str) -> Vec<&'static str> {
    COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(prefix))
        .collect()
}
