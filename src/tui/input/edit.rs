use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::util::unicode::pop_grapheme;

use super::typed_char;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Browse;
            app.refresh();
        }

        // Split on whitespace and run it as an annotation command
        KeyCode::Enter => {
            if let Mode::InlineEdit { target, buffer, .. } =
                std::mem::replace(&mut app.mode, Mode::Browse)
            {
                let tokens: Vec<&str> = buffer.split_whitespace().collect();
                app.apply_annotation(&target, &tokens);
            }
            // Keep the outcome message past the refresh
            let message = app.status_message.take();
            app.refresh();
            if app.status_message.is_none() {
                app.status_message = message;
            }
        }

        KeyCode::Backspace => {
            if let Mode::InlineEdit { buffer, .. } = &mut app.mode {
                pop_grapheme(buffer);
            }
        }

        _ => {
            if let Some(c) = typed_char(key)
                && let Mode::InlineEdit { buffer, .. } = &mut app.mode
            {
                buffer.push(c);
            }
        }
    }
}
