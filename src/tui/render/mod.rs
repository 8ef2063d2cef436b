pub mod checklist_view;
pub mod header;
pub mod help_overlay;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;
use super::confetti::render_confetti;

/// Draw one frame: header, checklist, status row, overlays
pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | checklist | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    checklist_view::render_checklist(frame, app, chunks[1]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Confetti falls over everything
    render_confetti(frame, app.checklist.player(), area, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use std::time::Duration;

    #[test]
    fn full_screen_layout() {
        let mut app = app_with_builtin();
        let now = Instant::now();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app, now);
        });
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("ShipList"));
        assert!(out.contains("0 / 19 completed"));
        assert!(out.contains(" FOUNDATION  0/4"));
        assert!(lines.last().unwrap().ends_with("q quit"));
    }

    #[test]
    fn confetti_draws_over_the_screen_until_expiry() {
        let mut app = app_with_abc();
        for _ in 0..3 {
            app.toggle_cursor();
            app.move_cursor(1);
        }
        assert!(app.checklist.player().is_active());

        let mid = Instant::now() + Duration::from_millis(1500);
        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app, mid);
        });
        assert!(out.contains(['\u{258C}', '\u{2580}', '\u{2584}']));

        let later = Instant::now() + Duration::from_secs(6);
        app.checklist.tick(later);
        assert!(!app.checklist.player().is_active());
        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app, later);
        });
        assert!(!out.contains(['\u{258C}', '\u{2580}', '\u{2584}']));
    }
}
