pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function: bordered table above the status row
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: table (rest) | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // table
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_table(frame, app, chunks[0]);
    status_row::render_status_row(frame, app, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let styles = app.theme.table_styles();
    let title = format!(" {} ", app.dir.display());
    let block = Block::bordered()
        .border_style(styles.border)
        .title(Span::styled(title, styles.header));
    let paragraph = Paragraph::new(app.table.render_lines())
        .block(block)
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
