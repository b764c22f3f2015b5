//! Navigation drawer used when the terminal is too narrow for the link bar.

#[derive(Debug, Clone, Default)]
pub struct MenuDrawer {
    open: bool,
    selected: usize,
}

/// Narrow terminals hide the link bar behind the drawer toggle.
pub fn is_compact(width: u16, compact_width: u16) -> bool {
    width < compact_width
}

impl MenuDrawer {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Bars while closed, a cross while open.
    pub fn icon(&self) -> &'static str {
        if self.open {
            "✕"
        } else {
            "☰"
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Growing past the compact breakpoint closes the drawer.
    pub fn on_resize(&mut self, width: u16, compact_width: u16) {
        if self.open && !is_compact(width, compact_width) {
            self.open = false;
        }
    }
}
