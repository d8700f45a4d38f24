//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for submit/copy shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms (Cmd+S also works on macOS terminals)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
