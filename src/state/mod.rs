//! Application state module

mod app_state;
mod forms;
mod navigation;
mod notifications;

pub use app_state::*;
pub use forms::*;
pub use notifications::*;
