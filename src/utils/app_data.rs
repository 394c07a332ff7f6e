use crate::query::{RankOptions, COMPLETION_LIMIT, DEFAULT_MIN_SCORE, SEARCH_LIMIT};
use crate::session::SessionOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "jsift";
const CONFIG_FILE: &str = "config.json";

/// Overrides the config file location
pub const CONFIG_ENV: &str = "JSIFT_CONFIG";

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minimum score (0-100) for a candidate to be shown
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Result limit for a submitted search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Result limit for completion-as-you-type
    #[serde(default = "default_completion_limit")]
    pub completion_limit: usize,

    /// Items shown per sequence in tree output
    #[serde(default = "default_tree_item_limit")]
    pub tree_item_limit: usize,

    /// Compare case-insensitively
    #[serde(default)]
    pub fold_case: bool,

    /// Start the TUI with live completions enabled
    #[serde(default = "default_complete_while_typing")]
    pub complete_while_typing: bool,
}

fn default_min_score() -> f64 {
    DEFAULT_MIN_SCORE
}

fn default_search_limit() -> usize {
    SEARCH_LIMIT
}

fn default_completion_limit() -> usize {
    COMPLETION_LIMIT
}

fn default_tree_item_limit() -> usize {
    5
}

fn default_complete_while_typing() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            search_limit: default_search_limit(),
            completion_limit: default_completion_limit(),
            tree_item_limit: default_tree_item_limit(),
            fold_case: false,
            complete_while_typing: default_complete_while_typing(),
        }
    }
}

impl AppConfig {
    /// Load config from `$JSIFT_CONFIG` or the user config directory,
    /// or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, defaulting when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            search: RankOptions {
                limit: self.search_limit,
                min_score: self.min_score.clamp(0.0, 100.0),
                fold_case: self.fold_case,
            },
            completion_limit: self.completion_limit,
        }
    }
}

/// Path of the config file, if one can be determined
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
