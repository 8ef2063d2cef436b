use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Left margin before each checkbox
const INDENT: &str = "   ";

/// Render the grouped checklist, keeping the cursor row in view
pub fn render_checklist(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let view = app.checklist.view();
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;
    let mut cursor_header_line = 0usize;
    let mut task_idx = 0usize;

    for (gi, group) in view.groups.iter().enumerate() {
        if gi > 0 {
            lines.push(Line::from(""));
        }
        let header_line = lines.len();
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", group.category.to_uppercase()),
                Style::default()
                    .fg(app.theme.text)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/{}", group.completed, group.tasks.len()),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ]));

        for task in &group.tasks {
            let is_cursor = task_idx == app.cursor;
            if is_cursor {
                cursor_line = lines.len();
                cursor_header_line = header_line;
            }
            let done = app.checklist.is_done(task.id);
            lines.push(task_line(app, task.title, done, is_cursor, width));
            task_idx += 1;
        }
    }

    // Keep the cursor visible, showing its category header when possible
    let height = area.height as usize;
    if height > 0 {
        if cursor_line < app.scroll_offset {
            app.scroll_offset = if cursor_line - cursor_header_line < height {
                cursor_header_line
            } else {
                cursor_line
            };
        } else if cursor_line >= app.scroll_offset + height {
            app.scroll_offset = cursor_line + 1 - height;
        }
    }

    let visible: Vec<Line> = lines.into_iter().skip(app.scroll_offset).collect();
    let paragraph = Paragraph::new(visible).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn task_line<'a>(app: &App, title: &str, done: bool, is_cursor: bool, width: usize) -> Line<'a> {
    let row_bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let marker = if is_cursor {
        Span::styled(
            "\u{258E}",
            Style::default().fg(app.theme.selection_border).bg(row_bg),
        )
    } else {
        Span::styled(" ", Style::default().bg(row_bg))
    };

    let (checkbox, checkbox_style, title_style) = if done {
        (
            "[x] ",
            Style::default().fg(app.theme.green).bg(row_bg),
            Style::default()
                .fg(app.theme.done)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            "[ ] ",
            Style::default().fg(app.theme.text).bg(row_bg),
            Style::default().fg(app.theme.text_bright).bg(row_bg),
        )
    };

    let prefix_width = 1 + INDENT.len() + checkbox.len();
    let title = unicode::truncate_to_width(title, width.saturating_sub(prefix_width));
    let used = prefix_width + unicode::display_width(&title);

    let mut spans = vec![
        marker,
        Span::styled(INDENT, Style::default().bg(row_bg)),
        Span::styled(checkbox, checkbox_style),
        Span::styled(title, title_style),
    ];
    // Fill the rest of the cursor row so the selection reads as a bar
    if is_cursor && used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(row_bg)));
    }
    Line::from(spans)
}
