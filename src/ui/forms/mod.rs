//! Form rendering (enquiry and newsletter signup)

mod field_renderer;

use crate::app::App;
use crate::state::FormId;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use field_renderer::{draw_field, draw_field_error};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a form view: stacked fields, the buttons row, and a help line
pub fn draw(frame: &mut Frame, area: Rect, app: &App, form_id: FormId) {
    let form = app.state.forms.get(form_id);

    // One input box and one feedback line per field
    let mut constraints: Vec<Constraint> = Vec::new();
    for field in form.fields() {
        constraints.push(if field.is_multiline {
            Constraint::Min(5)
        } else {
            Constraint::Length(3)
        });
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1)); // Help text
    constraints.push(Constraint::Min(0));

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (idx, field) in form.fields().iter().enumerate() {
        draw_field(frame, chunks[idx * 2], field, form.active_field() == idx);
        draw_field_error(frame, chunks[idx * 2 + 1], field);
    }

    let buttons_chunk = chunks[form.fields().len() * 2];
    let help_chunk = chunks[form.fields().len() * 2 + 1];
    draw_buttons(frame, buttons_chunk, app, form_id);
    draw_help(frame, help_chunk);
}

/// Draw the Submit and Clear buttons (0=Submit, 1=Clear)
fn draw_buttons(frame: &mut Frame, area: Rect, app: &App, form_id: FormId) {
    let form = app.state.forms.get(form_id);
    let on_buttons = form.is_buttons_row_active();
    let submitting = app.submission.is_submitting(form_id);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    let submit_label = if submitting {
        busy_label(app, form_id)
    } else {
        form.submit_label().to_string()
    };

    render_button(
        frame,
        chunks[0],
        &submit_label,
        Color::Green,
        on_buttons && form.selected_button() == 0,
        !submitting,
    );
    render_button(
        frame,
        chunks[1],
        "Clear",
        Color::Yellow,
        on_buttons && form.selected_button() == 1,
        !submitting,
    );
}

/// Animated "Sending" label while the delivery runs
fn busy_label(app: &App, form_id: FormId) -> String {
    let dots = app.submission
        .submitting_since(form_id)
        .map(|started| (started.elapsed().as_millis() / 400) % 4)
        .unwrap_or(0);
    format!("Sending{}", ".".repeat(dots as usize))
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(
            crate::platform::SUBMIT_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": send  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": back"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
