use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::model::{AnnotationRecord, Annotations, Config, EntryInfo, EntryKind};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into a `w`×`h` test terminal and return the text, styles dropped.
/// Trailing spaces and trailing blank rows are removed.
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
    terminal.draw(|frame| f(frame, frame.area())).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut rows: Vec<String> = (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .filter_map(|x| buf.cell((x, y)))
                .map(|cell| cell.symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows.join("\n")
}

/// Render the whole app at the standard test size.
pub fn render_app(app: &App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// A plain file entry
pub fn file(name: &str) -> EntryInfo {
    EntryInfo::new(name, EntryKind::File)
}

pub fn record(name: &str, tags: &[&str], description: &str) -> AnnotationRecord {
    AnnotationRecord {
        name: name.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: description.into(),
    }
}

/// An app over `entries` in a fake directory, sized `w`×`TERM_H`.
pub fn app_with(entries: Vec<EntryInfo>, records: Vec<AnnotationRecord>, w: u16) -> App {
    let annotations: Annotations = records.into_iter().map(|r| (r.name.clone(), r)).collect();
    App::new(
        PathBuf::from("/srv/docs"),
        Config::default(),
        entries,
        annotations,
        (w, TERM_H),
    )
}
