use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

const HINTS: &str = "space toggle  R reset  ? help  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::ConfirmReset => {
            let mut spans = vec![Span::styled(
                " Reset all progress? ",
                Style::default()
                    .fg(app.theme.red)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )];
            push_right_hint(&mut spans, "y confirm  n cancel", width, app);
            Line::from(spans)
        }
        Mode::Navigate => {
            let mut spans = Vec::new();
            if let Some(ref message) = app.status_message {
                spans.push(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ));
            } else if app.unsaved {
                spans.push(Span::styled(
                    " not saved",
                    Style::default().fg(app.theme.dim).bg(bg),
                ));
            }
            push_right_hint(&mut spans, HINTS, width, app);
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align `hint` after the existing spans if it fits
fn push_right_hint(spans: &mut Vec<Span<'static>>, hint: &'static str, width: usize, app: &App) {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn status_text(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn idle_shows_hints() {
        let app = app_with_abc();
        let out = status_text(&app);
        assert!(out.ends_with(HINTS));
        assert_eq!(out.chars().count(), TERM_W as usize);
    }

    #[test]
    fn confirm_prompt() {
        let mut app = app_with_abc();
        app.mode = Mode::ConfirmReset;
        let out = status_text(&app);
        assert!(out.starts_with(" Reset all progress?"));
        assert!(out.ends_with("y confirm  n cancel"));
    }

    #[test]
    fn message_and_unsaved_marker() {
        let mut app = app_with_abc();
        app.status_message = Some("Progress reset".into());
        assert!(status_text(&app).starts_with(" Progress reset"));

        app.status_message = None;
        app.unsaved = true;
        assert!(status_text(&app).starts_with(" not saved"));
    }

    #[test]
    fn narrow_terminal_drops_hints() {
        let app = app_with_abc();
        let out = render_to_string(20, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(out, "");
    }
}
