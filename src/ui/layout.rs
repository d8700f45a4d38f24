//! Layout components (menu panel, status bar)

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Views reachable from the menu, in display order
pub const MENU_VIEWS: [View; 3] = [View::Welcome, View::Enquiry, View::Signup];

/// Split the screen into an optional menu panel and the main content,
/// reserving the bottom line for the status bar
pub fn create_layout(area: Rect, menu_open: bool) -> (Option<Rect>, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if !menu_open {
        return (None, chunks[0]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Menu panel
            Constraint::Min(0),     // Main content
        ])
        .split(chunks[0]);

    (Some(columns[0]), columns[1])
}

/// Draw the menu panel with boxed buttons (centered vertically)
pub fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(BUTTON_HEIGHT), // Welcome
            Constraint::Length(BUTTON_HEIGHT), // Enquiry
            Constraint::Length(BUTTON_HEIGHT), // Newsletter
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    for (idx, view) in MENU_VIEWS.iter().enumerate() {
        render_button(
            frame,
            chunks[idx + 1],
            view.label(),
            Color::Cyan,
            idx == app.state.nav.menu_index,
            true,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Endpoint connectivity
    let conn_status = if app.state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Status message
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    // Venue name
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("⌂ {}", app.venue),
        Style::default().fg(Color::Blue),
    ));

    // Quit hint on the right
    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    if app.state.nav.menu_open {
        return "j/k:nav  Enter:open  Esc:close".to_string();
    }
    match app.state.current_view {
        View::Welcome => "m:menu  e:enquiry  n:newsletter  j/k:scroll  y:copy ref".to_string(),
        View::Enquiry | View::Signup => format!(
            "Tab:next  {}:send  Enter:select  Esc:back",
            crate::platform::SUBMIT_SHORTCUT
        ),
    }
}
