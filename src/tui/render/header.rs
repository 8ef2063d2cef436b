use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

pub const HEADER_HEIGHT: u16 = 6;

/// Widest the progress line and gauge get
const GAUGE_MAX_WIDTH: usize = 48;

pub const TITLE: &str = "ShipList";
pub const TAGLINE: &str = "SaaS launch checklist - Made for the ones who build.";

/// Render title, tagline, "c / t completed  p%" and the progress gauge
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let view = app.checklist.view();
    let width = (area.width as usize).saturating_sub(4).min(GAUGE_MAX_WIDTH);

    let left = format!("{} / {} completed", view.completed_count, view.total_count);
    let right = format!("{}%", view.percent);
    let padding = width.saturating_sub(left.chars().count() + right.chars().count());

    let filled = (width * view.percent as usize + 50) / 100;
    let gauge_color = if view.is_complete() {
        app.theme.green
    } else {
        app.theme.gauge_fill
    };

    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(app.theme.dim).bg(bg))),
        Line::from(""),
        Line::from(vec![
            Span::styled(left, Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(" ".repeat(padding), Style::default().bg(bg)),
            Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)),
        ]),
        Line::from(vec![
            Span::styled(
                "\u{2588}".repeat(filled),
                Style::default().fg(gauge_color).bg(bg),
            ),
            Span::styled(
                "\u{2591}".repeat(width - filled),
                Style::default().fg(app.theme.gauge_empty).bg(bg),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
