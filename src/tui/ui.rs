use crate::output::{hit_trees, HitTable, Label};
use crate::tui::app::{App, ResultView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Rows of the completion menu shown at once
const MENU_HEIGHT: usize = 5;

pub fn draw(f: &mut Frame, app: &App) {
    let menu_rows = app.completions.len().min(MENU_HEIGHT);
    let menu_height = if menu_rows == 0 { 0 } else { menu_rows as u16 + 2 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Input
            Constraint::Length(menu_height), // Completions
            Constraint::Min(5),              // Results
            Constraint::Length(1),           // Status bar
        ])
        .split(f.area());

    draw_input(f, app, chunks[0]);
    if menu_rows > 0 {
        draw_completions(f, app, chunks[1]);
    }
    draw_results(f, app, chunks[2]);
    draw_status_bar(f, app, chunks[3]);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let prompt = app.prompt();
    let line = Line::from(vec![
        Span::styled(prompt.clone(), Style::default().fg(Color::Cyan)),
        Span::styled(app.input.as_str(), Style::default().fg(Color::Yellow)),
    ]);
    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search (Tab: complete, Ctrl+V: keys/values, Ctrl+T: completion, Esc: quit) "),
    );

    f.render_widget(input, area);

    let cursor = prompt.chars().count() + app.input.chars().count();
    f.set_cursor_position((area.x + cursor as u16 + 1, area.y + 1));
}

fn draw_completions(f: &mut Frame, app: &App, area: Rect) {
    // Keep the highlighted entry in view
    let offset = app
        .selected
        .map(|i| (i + 1).saturating_sub(MENU_HEIGHT))
        .unwrap_or(0);

    let items: Vec<ListItem> = app
        .completions
        .iter()
        .enumerate()
        .skip(offset)
        .take(MENU_HEIGHT)
        .map(|(i, completion)| {
            let style = if app.selected == Some(i) {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![Span::styled(
                completion.text.clone(),
                Style::default().fg(Color::White),
            )];
            if let Some(score) = completion.score {
                spans.push(Span::styled(
                    format!("  {:.1}", score),
                    Style::default().fg(Color::Green),
                ));
            }
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Completions ({}) ", app.completions.len())),
    );

    f.render_widget(list, area);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let lines = result_lines(app);

    let title = match &app.view {
        ResultView::Hits { query, .. } => format!(" Results for '{}' ", query),
        _ => " Results ".to_string(),
    };

    let results = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((app.scroll as u16, 0));

    f.render_widget(results, area);
}

pub(super) fn result_lines(app: &App) -> Vec<Line<'static>> {
    match &app.view {
        ResultView::Empty => Vec::new(),
        ResultView::Message { text, error } => {
            let color = if *error { Color::Red } else { Color::Cyan };
            vec![Line::styled(text.clone(), Style::default().fg(color))]
        }
        ResultView::Hits { hits, .. } if hits.is_empty() => {
            vec![Line::raw("No matches found.")]
        }
        ResultView::Hits { hits, .. } => {
            let mut lines = Vec::new();

            if let Some(table) = HitTable::from_hits(hits) {
                let widths = table.widths();
                lines.push(Line::styled(
                    table.title.clone(),
                    Style::default().add_modifier(Modifier::ITALIC),
                ));
                lines.push(Line::styled(
                    pad_row(&table.headers.map(String::from), &widths),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                for row in &table.rows {
                    let spans: Vec<Span> = row
                        .iter()
                        .enumerate()
                        .map(|(i, cell)| {
                            let text = if i < 2 {
                                format!("{:<width$}  ", cell, width = widths[i])
                            } else {
                                cell.clone()
                            };
                            Span::styled(text, Style::default().fg(color_of(table.colors[i])))
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
            }

            for tree in hit_trees(hits, app.tree_item_limit) {
                lines.push(Line::raw(""));
                for row in tree.lines() {
                    let guide = Span::styled(row.guide, Style::default().fg(Color::DarkGray));
                    let mut spans = vec![guide];
                    match row.label {
                        Label::Name(name) => spans.push(Span::styled(
                            name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Label::Field { key, value } => {
                            spans.push(Span::styled(key.clone(), Style::default().fg(Color::Cyan)));
                            spans.push(Span::raw(": "));
                            spans.push(Span::styled(value.clone(), Style::default().fg(Color::Green)));
                        }
                        Label::Item(value) => {
                            spans.push(Span::raw("- "));
                            spans.push(Span::styled(value.clone(), Style::default().fg(Color::Green)));
                        }
                        Label::Scalar(value) => {
                            spans.push(Span::styled(value.clone(), Style::default().fg(Color::Green)));
                        }
                        other => spans.push(Span::styled(
                            other.plain(),
                            Style::default().fg(Color::DarkGray),
                        )),
                    }
                    lines.push(Line::from(spans));
                }
            }
            lines
        }
    }
}

fn pad_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    format!(
        "{:<w0$}  {:<w1$}  {}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1]
    )
}

fn color_of(color: termcolor::Color) -> Color {
    match color {
        termcolor::Color::Cyan => Color::Cyan,
        termcolor::Color::Magenta => Color::Magenta,
        termcolor::Color::Green => Color::Green,
        termcolor::Color::Blue => Color::Blue,
        termcolor::Color::Red => Color::Red,
        termcolor::Color::Yellow => Color::Yellow,
        _ => Color::White,
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let filter = if app.session.filter().is_active() {
        app.session.filter().patterns().join(",")
    } else {
        "none".to_string()
    };
    let text = format!(
        "[{}] filter: {} | completion: {} | {}",
        app.session.mode().label(),
        filter,
        if app.complete_while_typing { "on" } else { "off" },
        app.status_message
    );
    let status = Paragraph::new(text).style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}
