use dioxus::prelude::*;
use dioxus_router::{use_route, Link, Outlet, Routable, Router};

use crate::clipboard::CopySubject;
use crate::config::{use_runtime_config, RuntimeConfig};
use crate::consent::{ConsentPhase, ConsentStatus};
use crate::demo::DemoView;
use crate::dom::{apply_theme, lock_scroll, scroll_to_section};
use crate::hooks::{use_live_site, use_site};
use crate::layout::{
    copy_text, Breadcrumb, CodeBlock, ConsentBannerView, CookieSettingsModal, FadeIn,
    GlossaryModal, Navbar, Section, ShareButton, SidebarPanel, ToastView,
};
use crate::modal::GLOSSARY_MODAL;
use crate::scan::ScanState;
use crate::site::ClickRegion;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const FONT_AWESOME: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
const PRIVACY_CONTACT: &str = "privacy@cookieanalytics.pro";

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let Some(config) = config_resource() else {
        return rsx! {
            document::Title { "Cookie Analytics Pro" }
            div { class: "page loading",
                div { class: "spinner" }
            }
        };
    };

    rsx! {
        document::Title { "Cookie Analytics Pro" }
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME }
        SiteRoot { config: config }
    }
}

#[component]
fn SiteRoot(config: RuntimeConfig) -> Element {
    let site = use_live_site(config);
    use_context_provider(|| site);
    rsx! {
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/guida")]
        Guide {},
        #[route("/demo")]
        Demo {},
        #[route("/strumenti")]
        Tools {},
        #[route("/privacy")]
        Privacy {},
        #[route("/:..route")]
        NotFound { route: Vec<String> },
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home {} => "Home",
            Route::Guide {} => "Guida",
            Route::Demo {} => "Demo",
            Route::Tools {} => "Strumenti",
            Route::Privacy {} => "Privacy",
            Route::NotFound { .. } => "Pagina non trovata",
        }
    }
}

#[component]
fn Shell() -> Element {
    let mut site = use_site();
    let route = use_route::<Route>();

    let theme = use_memo(move || site.read().theme());
    use_effect(move || apply_theme(theme()));
    let scroll_locked = use_memo(move || site.read().modals().locks_scroll());
    use_effect(move || lock_scroll(scroll_locked()));
    let highlighted = use_memo(move || {
        site.read()
            .highlight()
            .active_section()
            .map(str::to_string)
    });
    use_effect(move || {
        if let Some(section) = highlighted() {
            scroll_to_section(&section);
        }
    });

    #[cfg(target_arch = "wasm32")]
    {
        use crate::dom::{current_hash, viewport_width, WindowListeners};

        let mut listeners = use_signal(|| None::<WindowListeners>);
        use_effect(move || {
            if listeners.peek().is_some() {
                return;
            }
            let attached = WindowListeners::attach(move |event| {
                let mut site = site;
                if let Ok(mut site) = site.try_write() {
                    site.window_event(event);
                }
            });
            if let Some(width) = viewport_width() {
                site.write().viewport_resized(width);
            }
            listeners.set(attached);
        });
        use_drop(move || {
            if let Some(listeners) = listeners.peek().as_ref() {
                listeners.detach();
            }
        });

        let path = route.to_string();
        use_effect(use_reactive((&path,), move |(_path,)| {
            site.write().hash_changed(&current_hash());
        }));
    }

    let is_home = matches!(route, Route::Home {});

    rsx! {
        div {
            class: "site",
            onclick: move |_| site.write().document_click(ClickRegion::Elsewhere),
            Navbar {}
            SidebarPanel {}
            main { class: "main-content",
                if !is_home {
                    Breadcrumb { label: route.label().to_string() }
                }
                Outlet::<Route> {}
            }
            footer { class: "footer",
                p { "© Cookie Analytics Pro · Informazioni indipendenti sui cookie di terze parti" }
                Link { to: Route::Privacy {}, "Privacy e cookie" }
            }
            ToastView {}
            ConsentBannerView {}
            CookieSettingsModal {}
            GlossaryModal {}
        }
    }
}

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "book-open",
        "Guida completa",
        "Cosa sono i cookie di prima e terza parte e come vengono usati per profilarti.",
    ),
    (
        "project-diagram",
        "Demo interattiva",
        "Guarda come un tracker riconosce lo stesso utente su siti diversi.",
    ),
    (
        "search",
        "Scanner",
        "Analizza un sito e scopri quali cookie e tracker installa.",
    ),
];

#[component]
fn Home() -> Element {
    rsx! {
        document::Title { "Cookie Analytics Pro" }
        section { class: "hero",
            h1 { "Scopri chi ti segue online" }
            p { class: "hero-subtitle",
                "Cookie Analytics Pro spiega come funzionano i cookie di terze parti e come proteggere la tua privacy."
            }
            div { class: "hero-actions",
                Link { to: Route::Guide {}, class: "btn btn-primary", "Inizia la guida" }
                Link { to: Route::Tools {}, class: "btn btn-outline", "Scansiona un sito" }
                ShareButton {}
            }
        }
        section { class: "features",
            for (index , (icon , title , text)) in FEATURES.into_iter().enumerate() {
                FadeIn { index: index,
                    div { class: "feature-card",
                        i { class: "fas fa-{icon}" }
                        h3 { "{title}" }
                        p { "{text}" }
                    }
                }
            }
        }
    }
}

const TRACKING_PIXEL: &str = r#"<img src="https://tracker.example/pixel.gif?uid=12345"
     width="1" height="1" style="display:none" alt="">"#;

const THIRD_PARTY_HEADER: &str = "Set-Cookie: _uid=a1b2c3; Domain=tracker.example; SameSite=None; Secure";

const BLOCK_THIRD_PARTY: &str = r#"// about:config (Firefox)
network.cookie.cookieBehavior = 5"#;

#[component]
fn Guide() -> Element {
    let mut site = use_site();
    rsx! {
        document::Title { "Guida · Cookie Analytics Pro" }
        div { class: "page-header",
            h1 { "Guida ai cookie di terze parti" }
            div { class: "page-actions",
                button {
                    class: "btn btn-outline",
                    onclick: move |_| site.write().download_guide(),
                    i { class: "fas fa-download" }
                    " Scarica PDF"
                }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| site.write().open_modal(GLOSSARY_MODAL),
                    i { class: "fas fa-book" }
                    " Glossario"
                }
            }
        }
        Section { id: "prima-parte", title: "Cookie di prima parte",
            p {
                "Sono impostati dal dominio che stai visitando: ricordano il carrello, la lingua o la sessione di accesso."
            }
        }
        Section { id: "terze-parti", title: "Cookie di terze parti",
            p {
                "Li imposta un dominio diverso da quello nella barra degli indirizzi, di solito tramite script o immagini incorporate."
            }
            CodeBlock { id: "code-header", code: THIRD_PARTY_HEADER.to_string() }
        }
        Section { id: "tracciamento", title: "Tracciamento cross-site",
            p {
                "Lo stesso tracker presente su molti siti legge il proprio cookie ovunque e ricostruisce la tua navigazione."
            }
            CodeBlock { id: "code-pixel", code: TRACKING_PIXEL.to_string() }
        }
        Section { id: "difendersi", title: "Come difendersi",
            ul {
                li { "Blocca i cookie di terze parti nelle impostazioni del browser." }
                li { "Usa estensioni che filtrano i tracker noti." }
                li { "Rifiuta i cookie non necessari nei banner di consenso." }
            }
            CodeBlock { id: "code-firefox", code: BLOCK_THIRD_PARTY.to_string() }
        }
    }
}

#[component]
fn Demo() -> Element {
    let mut site = use_site();
    let view = site.read().demo().view();
    let active = site.read().demo().is_active();
    let frame = site.read().demo().frame();

    rsx! {
        document::Title { "Demo · Cookie Analytics Pro" }
        div { class: "page-header",
            h1 { "Demo interattiva" }
            p { "Come un tracker collega le tue visite a siti diversi." }
        }
        div { id: "demoViz", class: if active { "demo-viz active" } else { "demo-viz" },
            if view == DemoView::Diagram {
                div { class: "demo-diagram",
                    div { class: "demo-node", i { class: "fas fa-globe" } span { "Sito A" } }
                    span { class: "demo-arrow", "→" }
                    div { class: "demo-node tracker", i { class: "fas fa-eye" } span { "Tracker" } }
                    span { class: "demo-arrow", "→" }
                    div { class: "demo-node", i { class: "fas fa-globe" } span { "Sito B" } }
                }
            } else {
                div { class: "demo-placeholder",
                    i { class: "fas fa-play-circle" }
                    p { "Premi \"Avvia demo\" per vedere il tracciamento in azione" }
                }
            }
        }
        div { class: "demo-controls",
            button { class: "btn btn-primary", onclick: move |_| site.write().start_demo(), "Avvia demo" }
            button { class: "btn btn-outline", onclick: move |_| site.write().reset_demo(), "Reset" }
        }
        div { id: "demoAnimation", class: "demo-animation",
            div { class: "demo-track",
                span { class: "demo-endpoint", "Sito A" }
                span { class: "demo-endpoint", "Sito B" }
            }
            if let Some(frame) = frame {
                div {
                    id: "cookieAnimation",
                    class: "cookie-marker",
                    style: "left: {frame.position}%",
                    "{frame.marker.glyph()}"
                }
            }
        }
        button { class: "btn btn-secondary", onclick: move |_| site.write().play_demo(),
            i { class: "fas fa-cookie" }
            " Mostra il viaggio del cookie"
        }
    }
}

#[component]
fn Tools() -> Element {
    let mut site = use_site();
    let mut url = use_signal(String::new);
    let state = site.read().scanner().state().clone();
    let report = site.read().scanner().report();
    let loading_target = match &state {
        ScanState::Loading { target } => Some(target.clone()),
        _ => None,
    };
    let scanned_target = match &state {
        ScanState::Complete { target } => target.clone(),
        _ => String::new(),
    };
    let loading = loading_target.is_some();

    rsx! {
        document::Title { "Strumenti · Cookie Analytics Pro" }
        div { class: "page-header",
            h1 { "Scanner di cookie" }
            p { "Inserisci l'indirizzo di un sito per vedere quali cookie e tracker utilizza." }
        }
        div { class: "scan-form",
            input {
                id: "scanUrl",
                r#type: "url",
                class: "scan-input",
                placeholder: "https://example.com",
                value: "{url}",
                oninput: move |event| url.set(event.value()),
                onkeydown: move |event| {
                    if event.key() == Key::Enter {
                        event.prevent_default();
                        site.write().scan(&url());
                    }
                },
            }
            button {
                id: "scanButton",
                class: "btn btn-primary",
                disabled: loading,
                onclick: move |_| site.write().scan(&url()),
                i { class: "fas fa-search" }
                if loading { " Scansione..." } else { " Scansiona" }
            }
        }
        div { id: "scanResults", class: "scan-results",
            if let Some(target) = loading_target {
                div { class: "scan-loading",
                    div { class: "spinner" }
                    p { "Scansione in corso..." }
                    p { class: "scan-target", "Analisi di: {target}" }
                }
            }
            if let Some(report) = report {
                div { class: "scan-report",
                    h3 { "Risultati per {scanned_target}" }
                    div { class: "stats-grid",
                        for stat in report.stats {
                            div { class: "stat-card {stat.tone.class()}",
                                span { class: "stat-value", "{stat.value}" }
                                span { class: "stat-label", "{stat.label}" }
                            }
                        }
                    }
                    h4 { "Conformità GDPR" }
                    ul { class: "compliance-list",
                        for check in report.compliance {
                            li { class: if check.passed { "check pass" } else { "check fail" },
                                if check.passed { "✓ " } else { "✗ " }
                                "{check.label}"
                            }
                        }
                    }
                    h4 { "Tracker rilevati" }
                    ul { class: "tracker-list",
                        for tracker in report.trackers {
                            li {
                                strong { "{tracker.name}" }
                                span { class: "tracker-domain", " {tracker.domain}" }
                            }
                        }
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| site.write().download_report(),
                        i { class: "fas fa-file-pdf" }
                        " Scarica report"
                    }
                }
            }
        }
    }
}

#[component]
fn Privacy() -> Element {
    let mut site = use_site();
    let choice = match site.read().consent().phase() {
        ConsentPhase::Decided(record) => match record.status {
            ConsentStatus::Accepted => "hai accettato tutti i cookie",
            ConsentStatus::Rejected => "hai rifiutato i cookie di terze parti",
        },
        _ => "non hai ancora espresso una scelta",
    };

    rsx! {
        document::Title { "Privacy · Cookie Analytics Pro" }
        div { class: "page-header",
            h1 { "Privacy e cookie" }
        }
        section { class: "content-section",
            h2 { "Cosa salviamo" }
            p {
                "Questo sito salva nel tuo browser solo il tema scelto e la tua decisione sui cookie, insieme al momento in cui l'hai presa."
            }
            p { class: "consent-status", "Attualmente {choice}." }
            button {
                class: "btn btn-primary",
                onclick: move |_| site.write().reopen_banner(),
                "Modifica preferenze cookie"
            }
        }
        section { class: "content-section",
            h2 { "Contatti" }
            p { "Per domande sulla privacy scrivi a {PRIVACY_CONTACT}." }
            button {
                class: "btn btn-outline",
                onclick: move |_| copy_text(site, CopySubject::Text, PRIVACY_CONTACT.to_string()),
                i { class: "fas fa-copy" }
                " Copia indirizzo"
            }
        }
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        document::Title { "Pagina non trovata · Cookie Analytics Pro" }
        div { class: "page-header",
            h1 { "404" }
            p { "La pagina /{path} non esiste." }
            Link { to: Route::Home {}, class: "btn btn-primary", "Torna alla home" }
        }
    }
}
