mod app;
mod ui;

pub use app::{App, Completion, ResultView};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Lines moved by PageUp/PageDown
const PAGE: usize = 10;

pub fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            // Only handle key press events, not release or repeat
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }
    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c' | 'd' | 'q')) => app.quit(),
        (KeyModifiers::CONTROL, KeyCode::Char('t')) => app.toggle_complete_while_typing(),
        (KeyModifiers::CONTROL, KeyCode::Char('v')) => app.toggle_mode(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.backspace(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => {
                if app.input.is_empty() {
                    app.quit();
                } else {
                    app.clear_input();
                }
            }
            KeyCode::Enter => app.submit(),
            KeyCode::Tab => app.accept_completion(),
            KeyCode::Down => app.select_next(),
            KeyCode::Up | KeyCode::BackTab => app.select_prev(),
            KeyCode::PageDown => app.scroll_down(PAGE),
            KeyCode::PageUp => app.scroll_up(PAGE),
            KeyCode::Char(c) => app.push_char(c),
            KeyCode::Backspace => app.backspace(),
            _ => {}
        },
        _ => {}
    }
}
