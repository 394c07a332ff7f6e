//! Interactive session state.
//!
//! A [`Session`] owns the loaded document, its derived indexes, the key
//! filter and the current search mode. Every change to the document or
//! the filter rebuilds the searchable universe from scratch.

pub mod command;

pub use command::{complete_command, Command, COMMANDS};

use crate::document::{self, Document, Value};
use crate::error::LoadError;
use crate::index::{Corpus, KeyFilter, Universe};
use crate::query::{rank_with, resolve_for_display, DisplayKind, RankOptions, RankedMatch};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// What free-text input is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Keys,
    Values,
}

impl SearchMode {
    pub fn toggled(self) -> Self {
        match self {
            SearchMode::Keys => SearchMode::Values,
            SearchMode::Values => SearchMode::Keys,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Keys => "keys",
            SearchMode::Values => "values",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    /// Ranking for full searches
    pub search: RankOptions,
    /// Result limit for completion-as-you-type
    pub completion_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            search: RankOptions::default(),
            completion_limit: crate::query::COMPLETION_LIMIT,
        }
    }
}

/// One search result ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Key {
        key: String,
        score: f64,
        display: DisplayKind,
        values: Vec<Value>,
    },
    Value {
        value: String,
        score: f64,
        keys: Vec<String>,
    },
}

impl SearchHit {
    pub fn score(&self) -> f64 {
        match self {
            SearchHit::Key { score, .. } | SearchHit::Value { score, .. } => *score,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SearchHit::Key { key, .. } => key,
            SearchHit::Value { value, .. } => value,
        }
    }
}

/// Result of dispatching one input line
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to do
    Idle,
    Hits {
        query: String,
        mode: SearchMode,
        hits: Vec<SearchHit>,
    },
    Info(String),
    Error(String),
    Exit,
}

struct Loaded {
    document: Document,
    source: Option<PathBuf>,
    corpus: Corpus,
}

pub struct Session {
    options: SessionOptions,
    loaded: Option<Loaded>,
    filter: KeyFilter,
    universe: Universe,
    mode: SearchMode,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            loaded: None,
            filter: KeyFilter::default(),
            universe: Universe::default(),
            mode: SearchMode::Keys,
        }
    }

    /// Load `path` and make it the active document. On failure the
    /// current document, if any, stays active.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        match document::load(path) {
            Ok(doc) => {
                self.replace_document(doc, Some(path.to_path_buf()));
                info!(
                    path = %path.display(),
                    keys = self.universe.keys.len(),
                    values = self.universe.values.len(),
                    "loaded document"
                );
                Ok(())
            }
            Err(e) => {
                error!(path = %e.path().display(), "{}", e);
                Err(e)
            }
        }
    }

    /// Swap in a new document, keeping the current filter and mode
    pub fn replace_document(&mut self, document: Document, source: Option<PathBuf>) {
        let corpus = Corpus::build(&document);
        self.loaded = Some(Loaded {
            document,
            source,
            corpus,
        });
        self.rebuild();
    }

    pub fn set_filter(&mut self, filter: KeyFilter) {
        self.filter = filter;
        self.rebuild();
        info!(patterns = ?self.filter.patterns(), keys = self.universe.keys.len(), "key filter applied");
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(KeyFilter::default());
    }

    pub fn toggle_mode(&mut self) -> SearchMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        info!(mode = mode.label(), "search mode changed");
    }

    fn rebuild(&mut self) {
        self.universe = match &self.loaded {
            Some(loaded) => loaded.corpus.universe(&self.filter),
            None => Universe::default(),
        };
    }

    pub fn document(&self) -> Option<&Document> {
        self.loaded.as_ref().map(|l| &l.document)
    }

    pub fn source(&self) -> Option<&Path> {
        self.loaded.as_ref().and_then(|l| l.source.as_deref())
    }

    /// Unfiltered derivations of the active document
    pub fn corpus(&self) -> Option<&Corpus> {
        self.loaded.as_ref().map(|l| &l.corpus)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn filter(&self) -> &KeyFilter {
        &self.filter
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Candidates for the current mode
    pub fn candidates(&self) -> &[String] {
        match self.mode {
            SearchMode::Keys => &self.universe.keys,
            SearchMode::Values => &self.universe.values,
        }
    }

    /// Ranked completions for partially typed input
    pub fn complete(&self, text: &str) -> Vec<RankedMatch> {
        let options = self.options.search.with_limit(self.options.completion_limit);
        rank_with(text, self.candidates(), &options)
    }

    /// Full search in the current mode
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let matches = rank_with(query, self.candidates(), &self.options.search);
        let hits: Vec<SearchHit> = match (self.mode, self.document()) {
            (_, None) => Vec::new(),
            (SearchMode::Keys, Some(doc)) => matches
                .into_iter()
                .map(|m| {
                    let resolved = resolve_for_display(doc.root(), &m.candidate);
                    SearchHit::Key {
                        display: resolved.display_kind(),
                        values: resolved.values.into_iter().cloned().collect(),
                        key: m.candidate,
                        score: m.score,
                    }
                })
                .collect(),
            (SearchMode::Values, Some(_)) => matches
                .into_iter()
                .map(|m| SearchHit::Value {
                    keys: self
                        .universe
                        .reverse
                        .get(&m.candidate)
                        .map(|keys| keys.iter().cloned().collect())
                        .unwrap_or_default(),
                    value: m.candidate,
                    score: m.score,
                })
                .collect(),
        };
        info!(query, mode = self.mode.label(), hits = hits.len(), "search");
        hits
    }

    /// Execute one parsed input line
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        match command {
            Command::Empty => Outcome::Idle,
            Command::Exit => Outcome::Exit,
            Command::Search(query) => {
                if self.loaded.is_none() {
                    return Outcome::Error("No data loaded. Use /load <file_path>".to_string());
                }
                let hits = self.search(&query);
                Outcome::Hits {
                    query,
                    mode: self.mode,
                    hits,
                }
            }
            Command::Load(path) => match self.open(&path) {
                Ok(()) => Outcome::Info(format!(
                    "Loaded '{}'. Found {} keys/columns.",
                    path.display(),
                    self.universe.keys.len()
                )),
                Err(e) => Outcome::Error(e.to_string()),
            },
            Command::Only(filter) => {
                let active = filter.is_active();
                self.set_filter(filter);
                if active {
                    Outcome::Info(format!(
                        "Fuzzy search now limited to keys containing: {} ({} keys)",
                        self.filter.patterns().join(", "),
                        self.universe.keys.len()
                    ))
                } else {
                    Outcome::Info("Fuzzy search filter cleared. Searching all keys.".to_string())
                }
            }
            Command::Mode => {
                let mode = self.toggle_mode();
                Outcome::Info(format!("Search set to {}.", mode.label()))
            }
            Command::Usage(usage) => Outcome::Info(format!("Usage: {}", usage)),
            Command::Unknown(line) => Outcome::Error(format!("Unknown command: {}", line)),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
