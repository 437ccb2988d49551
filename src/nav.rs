//! Active-link reconciliation, breadcrumb, navbar scroll state and the
//! hash-target highlight.

use std::time::Duration;

use crate::scheduler::{Scheduler, TaskId};
use crate::site::SiteEvent;

pub const HOME_PAGE: &str = "index";
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;
pub const HIGHLIGHT_LEAD: Duration = Duration::from_millis(100);
pub const HIGHLIGHT_HOLD: Duration = Duration::from_millis(2000);

/// Path plus fragment of the current document URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub path: String,
    pub hash: String,
}

impl PageLocation {
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: normalize_hash(&hash.into()),
        }
    }

    pub fn page(&self) -> &str {
        page_name(&self.path)
    }
}

/// Last path segment without a trailing `.html`; the site root is `index`.
pub fn page_name(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segment = path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(HOME_PAGE);
    segment.strip_suffix(".html").unwrap_or(segment)
}

fn normalize_hash(hash: &str) -> String {
    hash.trim().trim_start_matches('#').to_string()
}

fn split_href(href: &str) -> (&str, &str) {
    match href.split_once('#') {
        Some((path, fragment)) => (path, fragment),
        None => (href, ""),
    }
}

pub fn is_nav_active(href: &str, location: &PageLocation) -> bool {
    let (path, _) = split_href(href);
    page_name(path) == location.page()
}

/// Fragment links are only active when the current hash names the same
/// section.
pub fn is_sidebar_active(href: &str, location: &PageLocation) -> bool {
    let (path, fragment) = split_href(href);
    if page_name(path) != location.page() {
        return false;
    }
    fragment.is_empty() || fragment == location.hash
}

pub fn page_href(page: &str, section: Option<&str>) -> String {
    match section.filter(|section| !section.is_empty()) {
        Some(section) => format!("{page}#{section}"),
        None => page.to_string(),
    }
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLL_THRESHOLD_PX
}

/// Staggered `animation-delay` for the n-th `.fade-in` element.
pub fn fade_in_delay(index: usize) -> String {
    format!("{:.1}s", index as f64 * 0.1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

pub fn breadcrumb(page_label: &str) -> [Crumb; 2] {
    [
        Crumb {
            label: "Home".to_string(),
            href: Some("/".to_string()),
        },
        Crumb {
            label: page_label.to_string(),
            href: None,
        },
    ]
}

/// Scroll-to and temporary highlight of the section named by the hash.
#[derive(Default)]
pub struct SectionHighlight {
    target: Option<String>,
    active: bool,
    timer: Option<TaskId>,
}

impl SectionHighlight {
    pub fn active_section(&self) -> Option<&str> {
        self.target.as_deref().filter(|_| self.active)
    }

    pub fn hash_changed(&mut self, hash: &str, scheduler: &mut dyn Scheduler<SiteEvent>) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.active = false;
        let section = normalize_hash(hash);
        if section.is_empty() {
            self.target = None;
            return;
        }
        self.target = Some(section);
        self.timer = Some(scheduler.schedule(HIGHLIGHT_LEAD, SiteEvent::HighlightSection));
    }

    pub fn begin(&mut self, scheduler: &mut dyn Scheduler<SiteEvent>) {
        if self.target.is_none() {
            return;
        }
        self.active = true;
        self.timer = Some(scheduler.schedule(HIGHLIGHT_HOLD, SiteEvent::ClearHighlight));
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use pretty_assertions::assert_eq;

    const NAV: [&str; 5] = ["/", "/guida", "/demo", "/strumenti", "/privacy"];

    fn active_nav(location: &PageLocation) -> Vec<&'static str> {
        NAV.into_iter()
            .filter(|href| is_nav_active(href, location))
            .collect()
    }

    #[test]
    fn page_names_follow_last_segment() {
        assert_eq!(page_name("/"), "index");
        assert_eq!(page_name(""), "index");
        assert_eq!(page_name("/index.html"), "index");
        assert_eq!(page_name("/site/guida.html"), "guida");
        assert_eq!(page_name("/strumenti/"), "strumenti");
        assert_eq!(page_name("/demo?x=1"), "demo");
    }

    #[test]
    fn exactly_one_nav_link_is_active() {
        for (path, expected) in [
            ("/", "/"),
            ("/index.html", "/"),
            ("/guida", "/guida"),
            ("/strumenti", "/strumenti"),
        ] {
            let location = PageLocation::new(path, "");
            assert_eq!(active_nav(&location), vec![expected], "path {path}");
        }
        assert!(active_nav(&PageLocation::new("/altro", "")).is_empty());
    }

    #[test]
    fn sidebar_fragments_follow_hash() {
        let location = PageLocation::new("/guida", "#terze-parti");
        assert!(is_sidebar_active("/guida", &location));
        assert!(is_sidebar_active("/guida#terze-parti", &location));
        assert!(!is_sidebar_active("/guida#prima-parte", &location));
        assert!(!is_sidebar_active("/demo#terze-parti", &location));
    }

    #[test]
    fn helpers_render_expected_strings() {
        assert_eq!(page_href("guida", Some("terze-parti")), "guida#terze-parti");
        assert_eq!(page_href("guida", Some("")), "guida");
        assert_eq!(fade_in_delay(0), "0.0s");
        assert_eq!(fade_in_delay(3), "0.3s");
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
        assert_eq!(breadcrumb("Guida")[1].label, "Guida");
        assert_eq!(breadcrumb("Guida")[0].href.as_deref(), Some("/"));
    }

    fn run(
        highlight: &mut SectionHighlight,
        scheduler: &mut ManualScheduler<SiteEvent>,
        until_ms: u64,
    ) {
        while let Some(event) = scheduler.next_due(Duration::from_millis(until_ms)) {
            match event {
                SiteEvent::HighlightSection => highlight.begin(scheduler),
                SiteEvent::ClearHighlight => highlight.clear(),
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn highlight_starts_after_lead_and_clears_after_hold() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut highlight = SectionHighlight::default();
        highlight.hash_changed("#tracciamento", &mut scheduler);
        assert_eq!(highlight.active_section(), None);

        run(&mut highlight, &mut scheduler, 100);
        assert_eq!(highlight.active_section(), Some("tracciamento"));
        run(&mut highlight, &mut scheduler, 2100);
        assert_eq!(highlight.active_section(), None);
    }

    #[test]
    fn clearing_the_hash_drops_the_target() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut highlight = SectionHighlight::default();
        highlight.hash_changed("#tracciamento", &mut scheduler);
        highlight.hash_changed("", &mut scheduler);

        run(&mut highlight, &mut scheduler, 5000);
        assert_eq!(highlight.active_section(), None);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
