//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a bordered input box for a form field
///
/// A field carrying a validation error gets a red border regardless of
/// focus; otherwise the active field is cyan and the rest dark gray.
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_color = if field.has_error() {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let value = field.display_value();
    let cursor = if is_active { "▌" } else { "" };

    let content = if value.is_empty() && !is_active {
        let placeholder = if field.constraint.required {
            "(required)"
        } else {
            "(optional)"
        };
        Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )))
    } else if field.is_multiline {
        let mut lines: Vec<Line> = value.lines().map(|l| Line::from(l.to_string())).collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::raw(value),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw the validation message line under a field, if it has one
pub fn draw_field_error(frame: &mut Frame, area: Rect, field: &FormField) {
    if let Some(error) = &field.error {
        let line = Paragraph::new(Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(Color::Red)),
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
        ]));
        frame.render_widget(line, area);
    }
}
