//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button, tinted with `accent` while selected
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    accent: Color,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {label} "))
        .style(text_style)
        .centered();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
