use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_browse(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,

        (KeyModifiers::NONE, KeyCode::Char('/')) => enter_search(app),

        (KeyModifiers::NONE, KeyCode::Char('e') | KeyCode::Enter) => enter_inline_edit(app),

        (KeyModifiers::CONTROL, KeyCode::Char('e')) => app.request_editor(),

        (KeyModifiers::NONE, KeyCode::Char('r')) => app.refresh(),

        // Drop committed search filters
        (_, KeyCode::Esc) => {
            if !app.filters.is_empty() {
                app.filters.clear();
                app.rebuild();
            }
        }

        _ => {
            app.table.handle_key(key);
        }
    }
}

/// Start an incremental search over the rows currently shown
fn enter_search(app: &mut App) {
    if !app.table.is_filtered() {
        return;
    }
    app.mode = Mode::Search {
        query: String::new(),
        all_rows: app.table.rows().to_vec(),
    };
}

/// Start editing the selected entry's annotation
fn enter_inline_edit(app: &mut App) {
    let Some(row) = app.table.selected_row() else {
        return;
    };
    let target = row.name.clone();
    app.mode = Mode::InlineEdit {
        prompt: format!("Annotate {}: ", target),
        target,
        buffer: String::new(),
    };
}
