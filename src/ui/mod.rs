//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod welcome;

pub use layout::MENU_VIEWS;

use crate::app::App;
use crate::state::{FormId, View};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (menu_area, main_area) = layout::create_layout(area, app.state.nav.menu_open);

    if let Some(menu_area) = menu_area {
        layout::draw_menu(frame, menu_area, app);
    }

    // Draw main content based on current view
    match app.state.current_view {
        View::Welcome => welcome::draw(frame, main_area, app),
        View::Enquiry => forms::draw(frame, main_area, app, FormId::Enquiry),
        View::Signup => forms::draw(frame, main_area, app, FormId::Signup),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Toast overlays everything else
    components::toast::draw(frame, app);
}
