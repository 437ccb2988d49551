//! The state core. One [`Site`] owns every controller plus the scheduler
//! and preference store they share; UI handlers call its methods and
//! scheduled events come back through [`Site::handle`].

use std::time::Duration;

use crate::clipboard::ShareRequest;
use crate::config::RuntimeConfig;
use crate::consent::ConsentBanner;
use crate::demo::DemoVisualizer;
use crate::dom::WindowEvent;
use crate::locale::{LanguageSwitcher, Locale};
use crate::modal::{ModalStack, COOKIE_SETTINGS_MODAL};
use crate::nav::{navbar_scrolled, SectionHighlight};
use crate::notify::{Notice, Toast, Toaster};
use crate::scan::ScanSimulator;
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::sidebar::Sidebar;
use crate::storage::{MemoryStore, PreferenceStore};
use crate::theme::Theme;

pub const SCRIPT_ERROR_MESSAGE: &str = "Si è verificato un errore nell'applicazione";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteEvent {
    ToastExpired(u64),
    ToastRemoved(u64),
    ConsentDelayElapsed,
    ConsentBannerRemoved,
    ScanFinished(u64),
    DemoTick,
    DemoRewind,
    HighlightSection,
    ClearHighlight,
}

/// Where a document click landed. Clicks inside a region do not close it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickRegion {
    Elsewhere,
    /// The sidebar panel or its menu toggle.
    Sidebar,
    /// The language button or its dropdown.
    LanguageMenu,
}

pub struct Site<S, P> {
    config: RuntimeConfig,
    scheduler: S,
    store: P,
    toaster: Toaster,
    theme: Theme,
    language: LanguageSwitcher,
    sidebar: Sidebar,
    modals: ModalStack,
    demo: DemoVisualizer,
    scan: ScanSimulator,
    consent: ConsentBanner,
    highlight: SectionHighlight,
    scrolled: bool,
    viewport_px: u32,
    hash: String,
}

#[cfg(target_arch = "wasm32")]
pub type LiveSite =
    Site<crate::scheduler::BrowserScheduler<SiteEvent>, crate::storage::BrowserStore>;

#[cfg(not(target_arch = "wasm32"))]
pub type LiveSite = Site<ManualScheduler<SiteEvent>, MemoryStore>;

impl<S, P> Site<S, P>
where
    S: Scheduler<SiteEvent>,
    P: PreferenceStore,
{
    pub fn new(config: RuntimeConfig, mut scheduler: S, store: P) -> Self {
        let consent = ConsentBanner::boot(
            &store,
            &mut scheduler,
            config.banner_delay(),
            config.exit_animation(),
        );
        let theme = Theme::load(&store);
        tracing::debug!("site: booted with {} theme", theme.as_str());
        Self {
            toaster: Toaster::new(config.toast_visible(), config.exit_animation()),
            language: LanguageSwitcher::new(&config.default_language),
            sidebar: Sidebar::new(config.sidebar_breakpoint_px),
            scan: ScanSimulator::new(config.scan_delay()),
            modals: ModalStack::default(),
            demo: DemoVisualizer::default(),
            highlight: SectionHighlight::default(),
            scrolled: false,
            viewport_px: u32::MAX,
            hash: String::new(),
            consent,
            theme,
            config,
            scheduler,
            store,
        }
    }

    pub fn handle(&mut self, event: SiteEvent) {
        match event {
            SiteEvent::ToastExpired(id) => self.toaster.expire(id, &mut self.scheduler),
            SiteEvent::ToastRemoved(id) => self.toaster.remove(id),
            SiteEvent::ConsentDelayElapsed => self.consent.delay_elapsed(&self.store),
            SiteEvent::ConsentBannerRemoved => self.consent.exit_finished(),
            SiteEvent::ScanFinished(generation) => {
                if let Some(notice) = self.scan.finish(generation) {
                    self.notify(notice);
                }
            }
            SiteEvent::DemoTick => self.demo.tick(&mut self.scheduler),
            SiteEvent::DemoRewind => self.demo.rewind(),
            SiteEvent::HighlightSection => self.highlight.begin(&mut self.scheduler),
            SiteEvent::ClearHighlight => self.highlight.clear(),
        }
    }

    pub fn window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized(width) => self.viewport_resized(width),
            WindowEvent::Scrolled(scroll_y) => self.scrolled(scroll_y),
            WindowEvent::EscapePressed => self.escape_pressed(),
            WindowEvent::HashChanged(hash) => self.hash_changed(&hash),
            WindowEvent::ScriptError(message) => self.report_script_error(&message),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Hands the store back, e.g. to boot a fresh site over it.
    pub fn into_store(self) -> P {
        self.store
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toaster.current()
    }

    pub fn notify(&mut self, notice: Notice) {
        self.toaster.notify(notice, &mut self.scheduler);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        theme.save(&mut self.store);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn language(&self) -> &LanguageSwitcher {
        &self.language
    }

    pub fn toggle_language_menu(&mut self) {
        self.language.toggle();
    }

    pub fn select_language(&mut self, locale: Locale) {
        let notice = self.language.select(locale);
        self.notify(notice);
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar.toggle();
    }

    pub fn sidebar_link_clicked(&mut self) {
        self.sidebar.link_clicked(self.viewport_px);
    }

    pub fn document_click(&mut self, region: ClickRegion) {
        if region != ClickRegion::Sidebar {
            self.sidebar.outside_click(self.viewport_px);
        }
        if region != ClickRegion::LanguageMenu {
            self.language.close();
        }
    }

    pub fn viewport_resized(&mut self, width_px: u32) {
        self.viewport_px = width_px;
        self.sidebar.viewport_changed(width_px);
    }

    pub fn scrolled(&mut self, scroll_y: f64) {
        self.scrolled = navbar_scrolled(scroll_y);
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    pub fn open_modal(&mut self, id: &str) {
        self.modals.open(id);
    }

    pub fn close_modal(&mut self, id: &str) {
        self.modals.close(id);
    }

    pub fn escape_pressed(&mut self) {
        self.modals.close_all();
    }

    pub fn demo(&self) -> &DemoVisualizer {
        &self.demo
    }

    pub fn start_demo(&mut self) {
        let notice = self.demo.start();
        self.notify(notice);
    }

    pub fn reset_demo(&mut self) {
        self.demo.reset();
    }

    pub fn play_demo(&mut self) {
        self.demo.play(&mut self.scheduler);
    }

    pub fn scanner(&self) -> &ScanSimulator {
        &self.scan
    }

    pub fn scan(&mut self, input: &str) {
        if let Err(err) = self.scan.start(input, &mut self.scheduler) {
            tracing::debug!("scan rejected: {err}");
            self.notify(Notice::error(err.to_string()));
        }
    }

    pub fn download_report(&mut self) {
        let notice = self.scan.download_report();
        self.notify(notice);
    }

    pub fn download_guide(&mut self) {
        self.notify(Notice::info("Download PDF iniziato..."));
    }

    pub fn consent(&self) -> &ConsentBanner {
        &self.consent
    }

    pub fn accept_all(&mut self) {
        let notice = self
            .consent
            .accept_all(&mut self.store, &mut self.scheduler);
        self.notify(notice);
    }

    pub fn reject_all(&mut self) {
        let notice = self
            .consent
            .reject_all(&mut self.store, &mut self.scheduler);
        self.notify(notice);
    }

    pub fn customize_cookies(&mut self) {
        self.modals.open(COOKIE_SETTINGS_MODAL);
    }

    pub fn save_cookie_settings(&mut self, analytics: bool) {
        let notice = self
            .consent
            .save_custom(analytics, &mut self.store, &mut self.scheduler);
        self.modals.close(COOKIE_SETTINGS_MODAL);
        self.notify(notice);
    }

    pub fn close_banner(&mut self) {
        self.consent.dismiss(&mut self.scheduler);
    }

    pub fn reopen_banner(&mut self) {
        self.consent.reopen(&mut self.scheduler);
    }

    pub fn location_hash(&self) -> &str {
        &self.hash
    }

    pub fn highlight(&self) -> &SectionHighlight {
        &self.highlight
    }

    pub fn hash_changed(&mut self, hash: &str) {
        self.hash = hash.trim_start_matches('#').to_string();
        self.highlight.hash_changed(hash, &mut self.scheduler);
    }

    pub fn share_request(&self, url: &str) -> ShareRequest {
        ShareRequest {
            title: self.config.share_title.clone(),
            text: self.config.share_text.clone(),
            url: url.to_string(),
        }
    }

    pub fn report_script_error(&mut self, message: &str) {
        tracing::error!("uncaught script error: {message}");
        self.notify(Notice::error(SCRIPT_ERROR_MESSAGE));
    }
}

impl<P: PreferenceStore> Site<ManualScheduler<SiteEvent>, P> {
    /// Runs every event due within `by` of virtual time, in order.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.scheduler.elapsed() + by;
        while let Some(event) = self.scheduler.next_due(deadline) {
            self.handle(event);
        }
        self.scheduler.settle(deadline);
    }
}

impl Site<ManualScheduler<SiteEvent>, MemoryStore> {
    /// A site on virtual time over an in-memory store.
    pub fn headless(config: RuntimeConfig, store: MemoryStore) -> Self {
        Self::new(config, ManualScheduler::new(), store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::GLOSSARY_MODAL;
    use crate::notify::NoticeKind;
    use crate::storage::CONSENT_KEY;
    use pretty_assertions::assert_eq;

    fn site() -> Site<ManualScheduler<SiteEvent>, MemoryStore> {
        Site::headless(RuntimeConfig::default(), MemoryStore::new())
    }

    #[test]
    fn outside_clicks_close_menus_but_region_clicks_keep_them() {
        let mut site = site();
        site.window_event(WindowEvent::Resized(800));
        site.toggle_sidebar();
        site.toggle_language_menu();

        site.document_click(ClickRegion::LanguageMenu);
        assert!(site.language().is_open());
        assert!(!site.sidebar().is_open());

        site.toggle_sidebar();
        site.document_click(ClickRegion::Sidebar);
        assert!(site.sidebar().is_open());
        assert!(!site.language().is_open());
    }

    #[test]
    fn menu_toggle_leaves_language_menu_open() {
        let mut site = site();
        site.window_event(WindowEvent::Resized(800));
        site.toggle_language_menu();
        site.toggle_sidebar();
        assert!(site.sidebar().is_open());
        assert!(site.language().is_open());
    }

    #[test]
    fn clicks_inside_a_modal_close_menus_but_keep_the_modal() {
        let mut site = site();
        site.window_event(WindowEvent::Resized(800));
        site.toggle_sidebar();
        site.toggle_language_menu();
        site.open_modal(GLOSSARY_MODAL);

        site.document_click(ClickRegion::Elsewhere);
        assert!(!site.language().is_open());
        assert!(!site.sidebar().is_open());
        assert!(site.modals().is_open(GLOSSARY_MODAL));
    }

    #[test]
    fn cookie_settings_start_from_the_stored_decision() {
        let mut site = Site::headless(
            RuntimeConfig::default(),
            MemoryStore::new().with(CONSENT_KEY, "accepted"),
        );
        site.customize_cookies();
        let analytics = site.consent().analytics_allowed();
        assert!(analytics);

        site.save_cookie_settings(analytics);
        assert_eq!(site.store().get(CONSENT_KEY).as_deref(), Some("accepted"));
    }

    #[test]
    fn escape_closes_every_modal() {
        let mut site = site();
        site.customize_cookies();
        site.open_modal(GLOSSARY_MODAL);
        assert!(site.modals().locks_scroll());
        site.window_event(WindowEvent::EscapePressed);
        assert!(!site.modals().locks_scroll());
    }

    #[test]
    fn invalid_scan_reports_the_error_message() {
        let mut site = site();
        site.scan("   ");
        let toast = site.toast().expect("error toast");
        assert_eq!(toast.notice, Notice::error("Inserisci un URL valido"));
    }

    #[test]
    fn script_errors_show_the_generic_notice() {
        let mut site = site();
        site.report_script_error("ReferenceError: foo is not defined");
        let toast = site.toast().expect("error toast");
        assert_eq!(toast.notice.kind, NoticeKind::Error);
        assert_eq!(toast.notice.message, SCRIPT_ERROR_MESSAGE);
    }

    #[test]
    fn hash_is_recorded_without_marker() {
        let mut site = site();
        site.hash_changed("#terze-parti");
        assert_eq!(site.location_hash(), "terze-parti");
        site.advance(Duration::from_millis(100));
        assert_eq!(site.highlight().active_section(), Some("terze-parti"));
    }

    #[test]
    fn navbar_state_follows_scroll_offset() {
        let mut site = site();
        site.window_event(WindowEvent::Scrolled(120.0));
        assert!(site.navbar_scrolled());
        site.window_event(WindowEvent::Scrolled(10.0));
        assert!(!site.navbar_scrolled());
    }

    #[test]
    fn share_request_uses_configured_copy() {
        let request = site().share_request("https://example.com/guida");
        assert_eq!(request.title, "Cookie Analytics Pro");
        assert_eq!(request.text, "Scopri tutto sui cookie di terze parti");
        assert_eq!(request.url, "https://example.com/guida");
    }
}
