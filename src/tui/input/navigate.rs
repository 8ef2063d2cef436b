use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Rows to jump on PageUp/PageDown
const PAGE: isize = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(PAGE),
        KeyCode::PageUp => app.move_cursor(-PAGE),
        KeyCode::Char('g') | KeyCode::Home => app.cursor_to_start(),
        KeyCode::Char('G') | KeyCode::End => app.cursor_to_end(),

        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => app.toggle_cursor(),
        KeyCode::Char('R') => {
            app.status_message = None;
            app.mode = Mode::ConfirmReset;
        }
        _ => {}
    }
}
