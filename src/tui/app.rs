use crate::session::{complete_command, Command, Outcome, SearchHit, SearchMode, Session};
use crate::utils::AppConfig;
use lru::LruCache;
use std::num::NonZeroUsize;

/// LRU cache size for completion lists
const COMPLETION_CACHE_SIZE: usize = 128;

/// One entry in the completion menu
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// `None` for command completions
    pub score: Option<f64>,
}

/// What the results pane shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Empty,
    Message { text: String, error: bool },
    Hits {
        query: String,
        mode: SearchMode,
        hits: Vec<SearchHit>,
    },
}

/// Application state
pub struct App {
    pub session: Session,
    pub input: String,
    pub completions: Vec<Completion>,
    /// Highlighted completion, if the user has moved into the menu
    pub selected: Option<usize>,
    pub view: ResultView,
    pub scroll: usize,
    pub status_message: String,
    pub complete_while_typing: bool,
    pub tree_item_limit: usize,
    should_quit: bool,
    completion_cache: LruCache<String, Vec<Completion>>,
}

impl App {
    pub fn new(session: Session, config: &AppConfig) -> Self {
        let status_message = match session.source() {
            Some(path) => format!(
                "Loaded '{}'. Found {} keys/columns.",
                path.display(),
                session.universe().keys.len()
            ),
            None => "No data loaded. Use /load <file_path>".to_string(),
        };
        Self {
            session,
            input: String::new(),
            completions: Vec::new(),
            selected: None,
            view: ResultView::Empty,
            scroll: 0,
            status_message,
            complete_while_typing: config.complete_while_typing,
            tree_item_limit: config.tree_item_limit,
            should_quit: false,
            completion_cache: LruCache::new(
                NonZeroUsize::new(COMPLETION_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN),
            ),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// `[file name] Search> `
    pub fn prompt(&self) -> String {
        let name = self
            .session
            .source()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "no file".to_string());
        format!("[{}] Search> ", name)
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.refresh_completions();
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.refresh_completions();
    }

    pub fn delete_word(&mut self) {
        // Remove trailing whitespace first
        while self.input.ends_with(' ') {
            self.input.pop();
        }
        while !self.input.is_empty() && !self.input.ends_with(' ') {
            self.input.pop();
        }
        self.refresh_completions();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.refresh_completions();
    }

    /// Recompute the completion menu for the current input
    pub fn refresh_completions(&mut self) {
        self.selected = None;
        if !self.complete_while_typing || self.input.trim().is_empty() {
            self.completions.clear();
            return;
        }

        if self.input.starts_with('/') {
            self.completions = if self.input.contains(char::is_whitespace) {
                Vec::new()
            } else {
                complete_command(&self.input)
                    .into_iter()
                    .map(|cmd| Completion {
                        text: cmd.to_string(),
                        score: None,
                    })
                    .collect()
            };
            return;
        }

        if let Some(cached) = self.completion_cache.get(&self.input) {
            self.completions = cached.clone();
            return;
        }

        let completions: Vec<Completion> = self
            .session
            .complete(&self.input)
            .into_iter()
            .map(|m| Completion {
                text: m.candidate,
                score: Some(m.score),
            })
            .collect();
        self.completion_cache
            .put(self.input.clone(), completions.clone());
        self.completions = completions;
    }

    pub fn select_next(&mut self) {
        if self.completions.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.completions.len(),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.completions.is_empty() {
            return;
        }
        let last = self.completions.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Replace the input with the highlighted (or first) completion
    pub fn accept_completion(&mut self) {
        let index = self.selected.unwrap_or(0);
        if let Some(completion) = self.completions.get(index) {
            self.input = completion.text.clone();
            if completion.score.is_none() {
                // Commands take an argument
                self.input.push(' ');
            }
            self.completions.clear();
            self.selected = None;
        }
    }

    pub fn toggle_complete_while_typing(&mut self) {
        self.complete_while_typing = !self.complete_while_typing;
        self.status_message = format!(
            "Completion while typing {}.",
            if self.complete_while_typing { "on" } else { "off" }
        );
        self.refresh_completions();
    }

    pub fn toggle_mode(&mut self) {
        let mode = self.session.toggle_mode();
        self.completion_cache.clear();
        self.status_message = format!("Autocompletion set to {}.", mode.label());
        self.refresh_completions();
    }

    /// Run the current input as a command or search
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        let command = Command::parse(&line);
        let changes_corpus = matches!(
            command,
            Command::Load(_) | Command::Only(_) | Command::Mode
        );

        match self.session.dispatch(command) {
            Outcome::Idle => {}
            Outcome::Exit => self.quit(),
            Outcome::Hits { query, mode, hits } => {
                self.status_message = if hits.is_empty() {
                    "No matches found.".to_string()
                } else {
                    format!("{} matches for '{}' in {}", hits.len(), query, mode.label())
                };
                self.view = ResultView::Hits { query, mode, hits };
                self.scroll = 0;
            }
            Outcome::Info(text) => {
                self.status_message = text.clone();
                self.view = ResultView::Message { text, error: false };
            }
            Outcome::Error(text) => {
                self.status_message = text.clone();
                self.view = ResultView::Message { text, error: true };
            }
        }

        if changes_corpus {
            self.completion_cache.clear();
        }
        self.refresh_completions();
    }

    /// Scrolling stops with the last result line at the top of the pane
    pub fn scroll_down(&mut self, lines: usize) {
        let last = self.result_line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add(lines).min(last);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn result_line_count(&self) -> usize {
        super::ui::result_lines(self).len()
    }

    pub fn cached_completions(&self) -> usize {
        self.completion_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use serde_json::json;

    fn app() -> App {
        let mut session = Session::default();
        session.replace_document(
            Document::from_json_value(json!({"user": {"name": "Alice", "tags": ["admin", "vip"]}})),
            None,
        );
        App::new(session, &AppConfig::default())
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn test_typing_completes_keys() {
        let mut app = app();
        type_str(&mut app, "nam");
        assert_eq!(app.completions[0].text, "user.name");
        assert!(app.cached_completions() > 0);
    }

    #[test]
    fn test_command_completion() {
        let mut app = app();
        type_str(&mut app, "/o");
        let texts: Vec<&str> = app.completions.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["/only", "/open"]);
        app.select_next();
        app.select_next();
        app.accept_completion();
        assert_eq!(app.input, "/open ");
        assert!(app.completions.is_empty());
    }

    #[test]
    fn test_completion_toggle() {
        let mut app = app();
        app.toggle_complete_while_typing();
        type_str(&mut app, "nam");
        assert!(app.completions.is_empty());
    }

    #[test]
    fn test_submit_search() {
        let mut app = app();
        type_str(&mut app, "tags");
        app.submit();
        assert!(app.input.is_empty());
        match &app.view {
            ResultView::Hits { hits, mode, .. } => {
                assert_eq!(*mode, SearchMode::Keys);
                assert_eq!(hits[0].label(), "user.tags");
            }
            other => panic!("expected hits, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_change_clears_cache() {
        let mut app = app();
        type_str(&mut app, "vip");
        app.clear_input();
        assert!(app.cached_completions() > 0);

        app.toggle_mode();
        assert_eq!(app.cached_completions(), 0);
        type_str(&mut app, "vip");
        assert_eq!(app.completions[0].text, "vip");
    }

    #[test]
    fn test_submit_filter_clears_cache() {
        let mut app = app();
        type_str(&mut app, "nam");
        app.clear_input();
        type_str(&mut app, "/only tags");
        app.submit();
        assert_eq!(app.cached_completions(), 0);
        assert!(matches!(app.view, ResultView::Message { error: false, .. }));
        type_str(&mut app, "nam");
        assert!(app.completions.iter().all(|c| c.text != "user.name"));
    }

    #[test]
    fn test_submit_exit_and_errors() {
        let mut app = app();
        type_str(&mut app, "/bogus");
        app.submit();
        assert!(matches!(app.view, ResultView::Message { error: true, .. }));
        type_str(&mut app, "/exit");
        app.submit();
        assert!(app.should_quit());
    }

    #[test]
    fn test_delete_word_and_selection_wrap() {
        let mut app = app();
        type_str(&mut app, "user name ");
        app.delete_word();
        assert_eq!(app.input, "user ");

        app.clear_input();
        type_str(&mut app, "/");
        app.select_prev();
        assert_eq!(app.selected, Some(app.completions.len() - 1));
        app.select_next();
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_scroll_stops_at_last_line() {
        let mut session = Session::default();
        let tags: Vec<String> = (0..30).map(|i| format!("tag{}", i)).collect();
        session.replace_document(Document::from_json_value(json!({"tags": tags})), None);
        let mut app = App::new(session, &AppConfig::default());
        type_str(&mut app, "tags");
        app.submit();

        let last = app.result_line_count() - 1;
        assert!(last >= 30);
        for _ in 0..10 {
            app.scroll_down(10);
        }
        assert_eq!(app.scroll, last);
        app.scroll_up(10);
        assert_eq!(app.scroll, last - 10);
    }

    #[test]
    fn test_scroll_without_results() {
        let mut app = app();
        app.scroll_down(10);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_prompt_without_file() {
        let app = App::new(Session::default(), &AppConfig::default());
        assert_eq!(app.prompt(), "[no file] Search> ");
        assert!(app.status_message.starts_with("No data loaded"));
    }
}
