use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

const BROWSE_HINT: &str = "/ search  e annotate  ^E edit  r refresh  q quit";
const FILTER_HINT: &str = "Esc clear filter";
const SEARCH_HINT: &str = "Enter keep  Esc cancel";
const EDIT_HINT: &str = "+tag -tag or text  Enter save  Esc cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let cursor = Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)); // ▌

    let line = match &app.mode {
        Mode::Browse => {
            if let Some(message) = &app.status_message {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ))
            } else if !app.filters.is_empty() {
                let chain = app
                    .filters
                    .iter()
                    .map(|q| format!("/{}", q))
                    .collect::<Vec<_>>()
                    .join(" ");
                let spans = vec![Span::styled(
                    chain,
                    Style::default().fg(app.theme.dim).bg(bg),
                )];
                with_hint(spans, FILTER_HINT, width, app)
            } else if app.config.ui.show_key_hints {
                Line::from(Span::styled(
                    BROWSE_HINT,
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
        Mode::Search { query, .. } => {
            // Search prompt: /query▌
            let spans = vec![
                Span::styled(
                    format!("/{}", query),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                cursor,
            ];
            with_hint(spans, SEARCH_HINT, width, app)
        }
        Mode::InlineEdit { prompt, buffer, .. } => {
            let spans = vec![
                Span::styled(prompt.clone(), Style::default().fg(app.theme.text).bg(bg)),
                Span::styled(
                    buffer.clone(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                cursor,
            ];
            with_hint(spans, EDIT_HINT, width, app)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Right-align `hint` after `spans` when both fit on the row.
fn with_hint<'a>(mut spans: Vec<Span<'a>>, hint: &'a str, width: usize, app: &App) -> Line<'a> {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}
