use std::time::Duration;

use cookie_analytics_site::config::RuntimeConfig;
use cookie_analytics_site::consent::{ConsentPhase, ConsentStatus};
use cookie_analytics_site::demo::{Marker, TRACK_END_PERCENT};
use cookie_analytics_site::dom::WindowEvent;
use cookie_analytics_site::notify::{Notice, ToastPhase};
use cookie_analytics_site::scan::{ScanState, SHOWCASE_REPORT};
use cookie_analytics_site::scheduler::ManualScheduler;
use cookie_analytics_site::site::{Site, SiteEvent};
use cookie_analytics_site::storage::{
    MemoryStore, PreferenceStore, CONSENT_KEY, CONSENT_TIMESTAMP_KEY, THEME_KEY,
};
use cookie_analytics_site::theme::Theme;
use pretty_assertions::assert_eq;

type Headless = Site<ManualScheduler<SiteEvent>, MemoryStore>;

const LOADED_AT_MS: i64 = 1_700_000_000_000;

fn boot(store: MemoryStore) -> Headless {
    Site::new(
        RuntimeConfig::default(),
        ManualScheduler::starting_at(LOADED_AT_MS),
        store,
    )
}

fn reload(site: Headless) -> Headless {
    boot(site.into_store())
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn banner_appears_after_delay_on_first_visit() {
    let mut site = boot(MemoryStore::new());
    site.advance(ms(1999));
    assert_eq!(site.consent().phase(), ConsentPhase::Unseen);
    site.advance(ms(1));
    assert_eq!(site.consent().phase(), ConsentPhase::Shown);
    assert!(site.consent().is_rendered());
}

#[test]
fn accepted_banner_stays_away_after_reload() {
    let mut site = boot(MemoryStore::new());
    site.advance(ms(2500));
    site.accept_all();

    assert!(site.consent().is_exiting());
    site.advance(ms(300));
    assert!(!site.consent().is_rendered());
    assert_eq!(
        site.store().get(CONSENT_KEY).as_deref(),
        Some(ConsentStatus::Accepted.as_str())
    );
    assert_eq!(
        site.store().get(CONSENT_TIMESTAMP_KEY),
        Some((LOADED_AT_MS + 2500).to_string())
    );

    let mut site = reload(site);
    site.advance(ms(10_000));
    assert!(!site.consent().is_rendered());
    assert!(matches!(site.consent().phase(), ConsentPhase::Decided(_)));
}

#[test]
fn rejected_banner_stays_away_but_dismissed_banner_returns() {
    let mut site = boot(MemoryStore::new());
    site.advance(ms(2000));
    site.reject_all();
    let mut site = reload(site);
    site.advance(ms(5000));
    assert!(!site.consent().is_rendered());

    let mut site = boot(MemoryStore::new());
    site.advance(ms(2000));
    site.close_banner();
    site.advance(ms(300));
    assert!(!site.consent().is_rendered());
    assert_eq!(site.store().get(CONSENT_KEY), None);

    let mut site = reload(site);
    site.advance(ms(2000));
    assert!(site.consent().is_rendered());
}

#[test]
fn saving_custom_settings_persists_and_closes_the_modal() {
    let mut site = boot(MemoryStore::new());
    site.advance(ms(2000));
    site.customize_cookies();
    assert!(site.modals().locks_scroll());

    site.save_cookie_settings(false);
    assert!(!site.modals().locks_scroll());
    assert_eq!(site.store().get(CONSENT_KEY).as_deref(), Some("rejected"));
    assert_eq!(
        site.toast().map(|toast| toast.notice.clone()),
        Some(Notice::success("Preferenze cookie salvate"))
    );
}

#[test]
fn reopened_banner_overwrites_previous_choice() {
    let store = MemoryStore::new()
        .with(CONSENT_KEY, "rejected")
        .with(CONSENT_TIMESTAMP_KEY, "1");
    let mut site = boot(store);
    site.reopen_banner();
    assert!(site.consent().is_rendered());

    site.advance(ms(400));
    site.accept_all();
    site.advance(ms(300));
    assert!(!site.consent().is_rendered());
    assert_eq!(site.store().get(CONSENT_KEY).as_deref(), Some("accepted"));
}

#[test]
fn theme_toggle_survives_reload() {
    let mut site = boot(MemoryStore::new());
    assert_eq!(site.theme(), Theme::Dark);
    site.toggle_theme();
    assert_eq!(site.store().get(THEME_KEY).as_deref(), Some("light"));

    let mut site = reload(site);
    assert_eq!(site.theme(), Theme::Light);
    site.toggle_theme();
    let site = reload(site);
    assert_eq!(site.theme(), Theme::Dark);
}

#[test]
fn second_notice_wins_and_expires_on_schedule() {
    let mut site = boot(MemoryStore::new());
    site.download_guide();
    site.advance(ms(1000));
    site.download_report();

    let toast = site.toast().cloned().expect("toast visible");
    assert_eq!(toast.notice, Notice::success("Report PDF generato e scaricato"));

    site.advance(ms(3000));
    assert_eq!(site.toast().map(|toast| toast.phase), Some(ToastPhase::Leaving));
    site.advance(ms(300));
    assert!(site.toast().is_none());
}

#[test]
fn malformed_url_never_loads() {
    let mut site = boot(MemoryStore::new());
    site.scan("not a url");
    assert_eq!(site.scanner().state(), &ScanState::Idle);
    assert_eq!(
        site.toast().map(|toast| toast.notice.message.clone()).as_deref(),
        Some("URL non valido. Usa il formato: https://example.com")
    );
}

#[test]
fn scan_shows_the_same_report_for_any_url() {
    for url in ["https://example.com", "http://altro-sito.it/pagina"] {
        let mut site = boot(MemoryStore::new());
        site.scan(url);
        assert_eq!(
            site.scanner().state(),
            &ScanState::Loading {
                target: url.to_string()
            }
        );
        assert!(site.scanner().report().is_none());

        site.advance(ms(2000));
        assert_eq!(site.scanner().report(), Some(&SHOWCASE_REPORT));
        assert_eq!(
            site.toast().map(|toast| toast.notice.clone()),
            Some(Notice::success("Scansione completata!"))
        );
    }
}

#[test]
fn rescanning_supersedes_the_pending_scan() {
    let mut site = boot(MemoryStore::new());
    site.scan("https://primo.example");
    site.advance(ms(1500));
    site.scan("https://secondo.example");
    site.advance(ms(1000));
    assert!(matches!(site.scanner().state(), ScanState::Loading { .. }));

    site.advance(ms(1000));
    assert_eq!(
        site.scanner().state(),
        &ScanState::Complete {
            target: "https://secondo.example".to_string()
        }
    );
}

#[test]
fn demo_marker_moves_monotonically_to_the_end() {
    let mut site = boot(MemoryStore::new());
    site.play_demo();

    let mut positions = vec![site.demo().frame().expect("frame").position];
    for _ in 0..40 {
        site.advance(ms(20));
        positions.push(site.demo().frame().expect("frame").position);
    }
    assert_eq!(positions.first(), Some(&0));
    assert_eq!(positions.last(), Some(&TRACK_END_PERCENT));
    assert!(positions.windows(2).all(|pair| pair[1] == pair[0] + 2));
    assert_eq!(site.demo().frame().map(|frame| frame.marker), Some(Marker::Arrived));

    site.advance(ms(1000));
    let frame = site.demo().frame().expect("frame");
    assert_eq!((frame.position, frame.marker), (0, Marker::Cookie));
}

#[test]
fn zeroed_config_keeps_default_timings_and_breakpoint() {
    let config = RuntimeConfig::from_json(r#"{"toast_visible_ms": 0, "sidebar_breakpoint_px": 0}"#)
        .expect("decode");
    let mut site = Site::new(
        config,
        ManualScheduler::starting_at(LOADED_AT_MS),
        MemoryStore::new(),
    );

    site.download_guide();
    assert_eq!(site.toast().map(|toast| toast.phase), Some(ToastPhase::Visible));
    site.advance(ms(2999));
    assert_eq!(site.toast().map(|toast| toast.phase), Some(ToastPhase::Visible));

    site.window_event(WindowEvent::Resized(800));
    site.toggle_sidebar();
    site.sidebar_link_clicked();
    assert!(!site.sidebar().is_open());
}
