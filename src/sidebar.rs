/// Slide-in navigation panel used on narrow viewports.
pub struct Sidebar {
    open: bool,
    breakpoint_px: u32,
}

impl Sidebar {
    pub fn new(breakpoint_px: u32) -> Self {
        Self {
            open: false,
            breakpoint_px,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    fn is_narrow(&self, viewport_px: u32) -> bool {
        viewport_px <= self.breakpoint_px
    }

    /// A click that landed outside both the panel and its toggle.
    pub fn outside_click(&mut self, viewport_px: u32) {
        if self.is_narrow(viewport_px) {
            self.open = false;
        }
    }

    pub fn link_clicked(&mut self, viewport_px: u32) {
        if self.is_narrow(viewport_px) {
            self.open = false;
        }
    }

    pub fn viewport_changed(&mut self, viewport_px: u32) {
        if !self.is_narrow(viewport_px) {
            self.open = false;
        }
    }
}
