//! Welcome screen rendering

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Banner rows plus a blank line and the venue line underneath
const HEADER_HEIGHT: u16 = 8;

/// Build the FOYER text with styling
fn banner_lines() -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Cyan);
    vec![
        Line::from(Span::styled(
            "███████╗ ██████╗ ██╗   ██╗███████╗██████╗ ",
            style,
        )),
        Line::from(Span::styled(
            "██╔════╝██╔═══██╗╚██╗ ██╔╝██╔════╝██╔══██╗",
            style,
        )),
        Line::from(Span::styled(
            "█████╗  ██║   ██║ ╚████╔╝ █████╗  ██████╔╝",
            style,
        )),
        Line::from(Span::styled(
            "██╔══╝  ██║   ██║  ╚██╔╝  ██╔══╝  ██╔══██╗",
            style,
        )),
        Line::from(Span::styled(
            "██║     ╚██████╔╝   ██║   ███████╗██║  ██║",
            style,
        )),
        Line::from(Span::styled(
            "╚═╝      ╚═════╝    ╚═╝   ╚══════╝╚═╝  ╚═╝",
            style,
        )),
    ]
}

/// Draw the welcome screen
///
/// The tall banner collapses to a one-line header once the guest has
/// scrolled past the first few lines, giving the body the room instead.
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let condensed = app.state.nav.header_condensed();
    let header_height = if condensed { 1 } else { HEADER_HEIGHT };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);

    if condensed {
        let header = Paragraph::new(Line::from(Span::styled(
            format!("⌂ {}", app.venue),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .centered();
        frame.render_widget(header, chunks[0]);
    } else {
        let mut lines = banner_lines();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("{} · front desk", app.venue),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(Paragraph::new(lines).centered(), chunks[0]);
    }

    draw_body(frame, chunks[1], app);
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App) {
    let lines = body_lines();

    // Keep the last page on screen however far the wheel has spun
    let max_offset = lines.len().saturating_sub(area.height as usize);
    let offset = app.state.nav.scroll_offset.min(max_offset) as u16;

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(body, area);
}

fn body_lines() -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);
    vec![
        Line::default(),
        Line::from("  Hello! This kiosk sends your questions straight to our team."),
        Line::default(),
        Line::from(vec![
            Span::raw("    "),
            Span::styled("e", key),
            Span::raw("  leave an enquiry and we will get back to you"),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled("n", key),
            Span::raw("  join the newsletter for programme updates"),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled("m", key),
            Span::raw("  open the menu"),
        ]),
        Line::default(),
        Line::from("  What happens to your message"),
        Line::from("    A member of staff reads every enquiry the same working day."),
        Line::from("    If you leave an email address we reply there. Otherwise ask"),
        Line::from("    at the desk and quote the reference shown after you send."),
        Line::default(),
        Line::from("  Visiting"),
        Line::from("    The building is open Monday to Saturday, 9:00 to 18:00."),
        Line::from("    Step-free access is via the north entrance on Mill Lane."),
        Line::from("    Assistance dogs are welcome throughout the building."),
        Line::default(),
        Line::from("  Newsletter"),
        Line::from("    One email a month with the programme, no more than that."),
        Line::from("    Unsubscribe links are in every issue and take effect at once."),
        Line::default(),
        Line::from(Span::styled(
            "  Scroll with j/k or the mouse wheel. Esc brings you back here.",
            dim,
        )),
    ]
}
