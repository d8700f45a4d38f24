//! Reusable UI components

mod button;
pub mod toast;

pub use button::{render_button, BUTTON_HEIGHT};
