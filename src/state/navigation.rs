//! Menu and scroll state

/// Rows of scroll after which the welcome banner condenses to one line
pub const HEADER_CONDENSE_THRESHOLD: usize = 3;

/// Navigation chrome state: the toggleable menu and content scroll position
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Whether the menu panel is open
    pub menu_open: bool,
    /// Highlighted entry while the menu is open
    pub menu_index: usize,
    /// Scroll position of the welcome content
    pub scroll_offset: usize,
}

impl NavigationState {
    /// Toggle the menu panel
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Move the menu highlight down (wraps around)
    pub fn menu_next(&mut self, item_count: usize) {
        if item_count > 0 {
            self.menu_index = (self.menu_index + 1) % item_count;
        }
    }

    /// Move the menu highlight up (wraps around)
    pub fn menu_prev(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        if self.menu_index == 0 {
            self.menu_index = item_count - 1;
        } else {
            self.menu_index -= 1;
        }
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down a page (10 lines)
    pub fn scroll_down_page(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(10);
    }

    /// Scroll up a page (10 lines)
    pub fn scroll_up_page(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }

    /// Reset scroll when switching views
    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }

    /// Whether the tall banner should give way to the one-line header
    pub fn header_condensed(&self) -> bool {
        self.scroll_offset > HEADER_CONDENSE_THRESHOLD
    }
}
