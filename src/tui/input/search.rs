use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::tui::projector::filter_rows;
use crate::util::unicode::pop_grapheme;

use super::typed_char;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel: back to the rows shown before the search
        KeyCode::Esc => {
            if let Mode::Search { all_rows, .. } = std::mem::replace(&mut app.mode, Mode::Browse) {
                app.table.set_rows(all_rows);
                app.table.clamp_selection();
            }
        }

        // Keep the filtered rows; the query sticks across refreshes
        KeyCode::Enter => {
            if let Mode::Search { query, .. } = std::mem::replace(&mut app.mode, Mode::Browse)
                && !query.is_empty()
            {
                app.filters.push(query);
            }
        }

        KeyCode::Up | KeyCode::Down => {
            app.table.handle_key(key);
        }

        KeyCode::Backspace => {
            if let Mode::Search { query, .. } = &mut app.mode {
                pop_grapheme(query);
            }
            apply_query(app);
        }

        _ => {
            if let Some(c) = typed_char(key) {
                if let Mode::Search { query, .. } = &mut app.mode {
                    query.push(c);
                }
                apply_query(app);
            }
        }
    }
}

/// Re-filter the snapshot with the current query and select the first match
fn apply_query(app: &mut App) {
    if let Mode::Search { query, all_rows } = &app.mode {
        let rows = filter_rows(all_rows, app.table.columns(), query);
        app.table.set_rows(rows);
        app.table.select(0);
    }
}
