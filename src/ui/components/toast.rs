//! Notification toast overlay

use crate::app::App;
use crate::state::{Severity, ToastPhase};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the current toast in the bottom-right corner, above the status bar
///
/// The toast rides through the right screen edge while sliding, so only
/// the on-screen part is drawn.
pub fn draw(frame: &mut Frame, app: &App) {
    let Some(toast) = app.state.notifications.display() else {
        return;
    };

    let area = frame.area();
    if area.width < 12 || area.height < 6 {
        return;
    }

    let (icon, color) = match toast.severity {
        Severity::Success => ("✓", Color::Green),
        Severity::Error => ("✗", Color::Red),
        Severity::Warning => ("⚠", Color::Yellow),
        Severity::Info => ("ℹ", Color::Blue),
    };

    // icon + space + message, plus borders and inner padding
    let width = (toast.message.chars().count() as u16 + 6).min(area.width.saturating_sub(4));

    // Decelerate in, accelerate out
    let eased = match toast.phase {
        ToastPhase::SlideIn => simple_easing::cubic_out(toast.progress),
        ToastPhase::Visible => 1.0,
        ToastPhase::SlideOut => 1.0 - simple_easing::cubic_in(toast.progress),
    };
    let visible = ((width as f32) * eased).round() as u16;
    if visible < 3 {
        return;
    }

    let rect = Rect {
        x: area.width - visible.min(width),
        y: area.height.saturating_sub(4),
        width: visible.min(width),
        height: 3,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title_bottom(
            Line::styled(" Esc:dismiss ", Style::default().fg(Color::DarkGray)).right_aligned(),
        );
    let body = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::raw(toast.message),
    ]));

    frame.render_widget(Clear, rect);
    frame.render_widget(body.block(block), rect);
}
