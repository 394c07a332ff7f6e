//! Per-run log file.
//!
//! Every run logs to a fresh temporary file. With `--verbose` the file is
//! echoed to stdout when the run ends; it is always deleted afterwards.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives for the log file, e.g. `JSIFT_LOG=debug`
pub const LOG_ENV: &str = "JSIFT_LOG";

pub struct SessionLog {
    file: NamedTempFile,
    verbose: bool,
}

impl SessionLog {
    /// Create the log file without installing a subscriber
    pub fn create(verbose: bool) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("jsift-")
            .suffix(".log")
            .tempfile()
            .context("Failed to create log file")?;
        Ok(Self { file, verbose })
    }

    /// Create the log file and route `tracing` output to it. With
    /// `console`, warnings and errors also go to stderr.
    pub fn init(verbose: bool, console: bool) -> Result<Self> {
        let log = Self::create(verbose)?;
        let writer = log.file.reopen().context("Failed to open log file")?;

        let env_filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(writer))
            .with_filter(env_filter);
        let console_layer = console.then(|| {
            fmt::layer()
                .with_ansi(io::stderr().is_terminal())
                .without_time()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(LevelFilter::WARN)
        });

        tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .context("Failed to install log subscriber")?;

        tracing::info!(path = %log.path().display(), "log file created");
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the log contents between markers
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let content = fs::read_to_string(self.path())?;
        writeln!(out, "\n--- Log File Content ---")?;
        write!(out, "{}", content)?;
        writeln!(out, "------------------------")?;
        Ok(())
    }
}

impl Drop for SessionLog {
    fn drop(&mut self) {
        if self.verbose {
            let _ = self.dump(&mut io::stdout().lock());
        }
        // NamedTempFile removes the file itself
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_wraps_content() {
        let mut log = SessionLog::create(false).unwrap();
        writeln!(log.file, "INFO loaded document").unwrap();

        let mut out = Vec::new();
        log.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\n--- Log File Content ---\n"));
        assert!(text.contains("INFO loaded document\n"));
        assert!(text.ends_with("------------------------\n"));
    }

    #[test]
    fn test_file_removed_on_drop() {
        let log = SessionLog::create(false).unwrap();
        let path = log.path().to_path_buf();
        assert!(path.exists());
        drop(log);
        assert!(!path.exists());
    }
}
