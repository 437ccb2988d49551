//! Language switcher. Only the button label changes; page copy stays in
//! Italian.

use crate::notify::Notice;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    It,
    En,
    Fr,
    De,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::It, Locale::En, Locale::Fr, Locale::De];

    pub fn code(self) -> &'static str {
        match self {
            Locale::It => "it",
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn flag(self) -> &'static str {
        match self {
            Locale::It => "🇮🇹",
            Locale::En => "🇬🇧",
            Locale::Fr => "🇫🇷",
            Locale::De => "🇩🇪",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Locale::It => "Italiano",
            Locale::En => "English",
            Locale::Fr => "Français",
            Locale::De => "Deutsch",
        }
    }

    pub fn label(self) -> String {
        self.code().to_uppercase()
    }
}

pub struct LanguageSwitcher {
    current: Locale,
    open: bool,
}

impl LanguageSwitcher {
    pub fn new(default_code: &str) -> Self {
        let current = Locale::from_code(default_code).unwrap_or_else(|| {
            tracing::warn!("locale: unknown default language `{default_code}`, using it");
            Locale::default()
        });
        Self {
            current,
            open: false,
        }
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn select(&mut self, locale: Locale) -> Notice {
        self.current = locale;
        self.open = false;
        Notice::info(format!("Lingua cambiata in {}", locale.name()))
    }
}
