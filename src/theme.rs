use crate::storage::{persist, PreferenceStore, THEME_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything other than a stored `"light"` means dark.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        store
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default()
    }

    pub fn save(self, store: &mut dyn PreferenceStore) {
        persist(store, THEME_KEY, self.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_dark() {
        assert_eq!(Theme::load(&MemoryStore::new()), Theme::Dark);
        let garbage = MemoryStore::new().with(THEME_KEY, "sepia");
        assert_eq!(Theme::load(&garbage), Theme::Dark);
    }

    #[test]
    fn saved_theme_loads_back() {
        let mut store = MemoryStore::new();
        Theme::Light.save(&mut store);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(Theme::load(&store), Theme::Light);
    }
}
