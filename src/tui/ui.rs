//! UI layout and rendering logic for the editor.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::printer::{self, NoticeKind};

use super::app::{App, EditBuffer, Focus};

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),     // Code editor
            Constraint::Length(10), // Stdin + output row
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    render_code_pane(frame, app, main_layout[0]);

    let io_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_layout[1]);

    render_stdin_pane(frame, app, io_layout[0]);
    render_output_pane(frame, app, io_layout[1]);
    render_status_bar(frame, app, main_layout[2]);

    if let Some(toast) = &app.toast {
        render_toast(frame, &toast.message, toast.kind);
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_code_pane(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let focused = app.focus == Focus::Code;
    let title = format!(" {} ", app.language_label());
    render_buffer(frame, &app.code, area, &title, theme.foreground, border_style(app, focused), focused);
}

fn render_stdin_pane(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let focused = app.focus == Focus::Stdin;
    render_buffer(frame, &app.stdin, area, " Input ", theme.foreground, border_style(app, focused), focused);
}

fn border_style(app: &App, focused: bool) -> Style {
    let theme = app.theme();
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    }
}

/// Render an edit buffer with scroll-follow and a visible cursor when the
/// pane has focus.
fn render_buffer(
    frame: &mut Frame,
    buffer: &EditBuffer,
    area: Rect,
    title: &str,
    fg: Color,
    border: Style,
    focused: bool,
) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll = buffer.row.saturating_sub(visible_height.saturating_sub(1).max(1));

    let lines: Vec<Line> = buffer
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(fg))))
        .collect();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border))
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);

    if focused {
        let line = &buffer.lines[buffer.row];
        let byte = line
            .char_indices()
            .nth(buffer.col)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        let cursor_x = area.x + 1 + line[..byte].width() as u16;
        let cursor_y = area.y + 1 + (buffer.row - scroll) as u16;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn render_output_pane(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let mut lines: Vec<Line> = Vec::new();

    if app.session.processing {
        lines.push(Line::from(Span::styled(
            "Running...",
            Style::default().fg(theme.accent),
        )));
    } else if let Some(result) = &app.session.output {
        let (body, is_error) = printer::primary_output(result);
        let body_style = if is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(theme.foreground)
        };
        for line in body.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), body_style)));
        }
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        // Metrics are always shown when a result exists.
        lines.push(Line::from(Span::styled(
            printer::metrics(result),
            Style::default().fg(theme.dim),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Press F5 or Ctrl+Enter to run",
            Style::default().fg(theme.dim),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Output ")
                .border_style(Style::default().fg(theme.dim)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let run_label = if app.session.processing { "running…" } else { "F5/Ctrl+Enter run" };
    let status_text = format!(
        " F1 help | F2 focus | F3 lang: {} | F4 theme: {} | {} | Ctrl+Q quit",
        app.session.language.tag, app.session.theme, run_label
    );

    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_paragraph, area);
}

/// Transient notification banner in the top-right corner.
fn render_toast(frame: &mut Frame, message: &str, kind: NoticeKind) {
    let area = frame.area();
    let width = (message.width() as u16 + 4).min(area.width.saturating_sub(2)).max(10);
    let height = 3;
    let toast_area = Rect::new(area.width.saturating_sub(width + 1), 1, width, height);

    let (title, color) = match kind {
        NoticeKind::Success => (" ok ", Color::Green),
        NoticeKind::Error => (" error ", Color::Red),
    };

    frame.render_widget(Clear, toast_area);
    let paragraph = Paragraph::new(message)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, toast_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(60, 60, area);

    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Editor Help"),
        Line::from(""),
        Line::from("  F1             - Toggle this help"),
        Line::from("  F2             - Switch focus (code / input)"),
        Line::from("  F3             - Cycle language"),
        Line::from("  F4             - Cycle theme"),
        Line::from("  F5, Ctrl+Enter - Submit and run"),
        Line::from("  Tab            - Indent (code pane)"),
        Line::from("  Ctrl+Q, Ctrl+C - Quit"),
        Line::from(""),
        Line::from("The run trigger is disabled while a submission"),
        Line::from("is in flight."),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
