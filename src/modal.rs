use std::collections::BTreeSet;

pub const COOKIE_SETTINGS_MODAL: &str = "cookieSettingsModal";
pub const GLOSSARY_MODAL: &str = "glossaryModal";

/// Ids of the modals currently shown. Any open modal locks page scroll.
#[derive(Default)]
pub struct ModalStack {
    open: BTreeSet<String>,
}

impl ModalStack {
    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    pub fn locks_scroll(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn open(&mut self, id: &str) {
        tracing::debug!("modal: open {id}");
        self.open.insert(id.to_string());
    }

    pub fn close(&mut self, id: &str) {
        self.open.remove(id);
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }
}
