use dioxus::prelude::*;

use crate::config::RuntimeConfig;
use crate::site::LiveSite;

/// Builds the site once and connects browser timers back to it.
#[cfg(target_arch = "wasm32")]
pub fn use_live_site(config: RuntimeConfig) -> Signal<LiveSite> {
    use crate::scheduler::{BrowserScheduler, EventSink};
    use crate::site::{Site, SiteEvent};
    use crate::storage::BrowserStore;

    let sink = use_hook(EventSink::<SiteEvent>::default);
    let scheduler_sink = sink.clone();
    let site = use_signal(move || {
        Site::new(config, BrowserScheduler::new(scheduler_sink), BrowserStore::open())
    });
    use_hook(move || {
        sink.connect(move |event| {
            let mut site = site;
            match site.try_write() {
                Ok(mut site) => site.handle(event),
                Err(_) => tracing::warn!("site: dropped {event:?}, state unavailable"),
            }
        })
    });
    site
}

#[cfg(not(target_arch = "wasm32"))]
pub fn use_live_site(config: RuntimeConfig) -> Signal<LiveSite> {
    use crate::site::Site;
    use crate::storage::MemoryStore;

    use_signal(move || Site::headless(config, MemoryStore::new()))
}

pub fn use_site() -> Signal<LiveSite> {
    use_context::<Signal<LiveSite>>()
}
