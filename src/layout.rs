//! Shared chrome: navbar, sidebar, breadcrumb, toast, consent banner and
//! modals, plus the small building blocks pages reuse.

use dioxus::prelude::*;
use dioxus_router::{use_route, Link};

use crate::clipboard::{copy_notice, CopySubject};
use crate::hooks::use_site;
use crate::locale::Locale;
use crate::modal::{COOKIE_SETTINGS_MODAL, GLOSSARY_MODAL};
use crate::nav::{breadcrumb, fade_in_delay, is_nav_active, is_sidebar_active, page_href, PageLocation};
use crate::notify::ToastPhase;
use crate::routes::Route;
use crate::site::{ClickRegion, LiveSite};
use crate::theme::Theme;

fn nav_links() -> [(Route, &'static str); 5] {
    [
        (Route::Home {}, "Home"),
        (Route::Guide {}, "Guida"),
        (Route::Demo {}, "Demo"),
        (Route::Tools {}, "Strumenti"),
        (Route::Privacy {}, "Privacy"),
    ]
}

const SIDEBAR_LINKS: [(&str, Option<&str>, &str); 7] = [
    ("/guida", None, "Panoramica"),
    ("/guida", Some("prima-parte"), "Cookie di prima parte"),
    ("/guida", Some("terze-parti"), "Cookie di terze parti"),
    ("/guida", Some("tracciamento"), "Tracciamento cross-site"),
    ("/guida", Some("difendersi"), "Come difendersi"),
    ("/demo", None, "Demo interattiva"),
    ("/strumenti", None, "Scanner"),
];

fn current_location(site: Signal<LiveSite>) -> PageLocation {
    let route = use_route::<Route>();
    PageLocation::new(route.to_string(), site.read().location_hash().to_string())
}

#[component]
pub fn Navbar() -> Element {
    let mut site = use_site();
    let location = current_location(site);
    let scrolled = site.read().navbar_scrolled();
    let sidebar_open = site.read().sidebar().is_open();
    let light = site.read().theme() == Theme::Light;

    rsx! {
        nav { id: "navbar", class: if scrolled { "navbar scrolled" } else { "navbar" },
            div { class: "nav-container",
                button {
                    id: "menuToggle",
                    class: "menu-toggle",
                    aria_label: "Apri menu",
                    aria_expanded: "{sidebar_open}",
                    onclick: move |event| {
                        event.stop_propagation();
                        site.write().toggle_sidebar();
                    },
                    i { class: "fas fa-bars" }
                }
                Link { to: Route::Home {}, class: "nav-logo",
                    i { class: "fas fa-cookie-bite" }
                    span { "Cookie Analytics Pro" }
                }
                ul { class: "nav-menu",
                    for (route , label) in nav_links() {
                        li {
                            Link {
                                class: if is_nav_active(&route.to_string(), &location) { "nav-link active" } else { "nav-link" },
                                to: route.clone(),
                                "{label}"
                            }
                        }
                    }
                }
                div { class: "nav-actions",
                    LanguageMenu {}
                    label { class: "theme-switch", title: "Tema chiaro",
                        input {
                            r#type: "checkbox",
                            id: "themeToggle",
                            checked: light,
                            onchange: move |event| {
                                let theme = if event.checked() { Theme::Light } else { Theme::Dark };
                                site.write().set_theme(theme);
                            },
                        }
                        span { class: "slider" }
                    }
                }
            }
        }
    }
}

#[component]
fn LanguageMenu() -> Element {
    let mut site = use_site();
    let current = site.read().language().current();
    let open = site.read().language().is_open();

    rsx! {
        div { class: "lang-switcher",
            button {
                id: "langBtn",
                class: "lang-btn",
                onclick: move |event| {
                    event.stop_propagation();
                    let mut site = site.write();
                    site.toggle_language_menu();
                    site.document_click(ClickRegion::LanguageMenu);
                },
                span { class: "flag", "{current.flag()}" }
                span { class: "lang-code", "{current.label()}" }
                i { class: "fas fa-chevron-down" }
            }
            div {
                id: "langDropdown",
                class: if open { "lang-dropdown show" } else { "lang-dropdown" },
                for locale in Locale::ALL {
                    button {
                        class: if locale == current { "lang-option active" } else { "lang-option" },
                        "data-lang": locale.code(),
                        onclick: move |event| {
                            event.stop_propagation();
                            let mut site = site.write();
                            site.select_language(locale);
                            site.document_click(ClickRegion::LanguageMenu);
                        },
                        span { class: "flag", "{locale.flag()}" }
                        span { "{locale.name()}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SidebarPanel() -> Element {
    let mut site = use_site();
    let location = current_location(site);
    let open = site.read().sidebar().is_open();

    rsx! {
        aside {
            id: "sidebar",
            class: if open { "sidebar open" } else { "sidebar" },
            onclick: move |event| {
                event.stop_propagation();
                site.write().document_click(ClickRegion::Sidebar);
            },
            h3 { class: "sidebar-title", "Indice" }
            ul { class: "sidebar-menu",
                for (page , section , label) in SIDEBAR_LINKS {
                    li { onclick: move |_| site.write().sidebar_link_clicked(),
                        a {
                            class: if is_sidebar_active(&page_href(page, section), &location) { "sidebar-link active" } else { "sidebar-link" },
                            href: page_href(page, section),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Breadcrumb(label: String) -> Element {
    let [home, current] = breadcrumb(&label);
    rsx! {
        nav { id: "breadcrumb", class: "breadcrumb", aria_label: "Percorso",
            a { href: home.href.unwrap_or_default(), "{home.label}" }
            span { class: "breadcrumb-separator", " / " }
            span { class: "breadcrumb-current", "{current.label}" }
        }
    }
}

#[component]
pub fn ToastView() -> Element {
    let site = use_site();
    let Some(toast) = site.read().toast().cloned() else {
        return rsx! {};
    };
    let kind = toast.notice.kind;
    let leaving = if toast.phase == ToastPhase::Leaving { " hiding" } else { "" };

    rsx! {
        div {
            class: "notification {kind.class()}{leaving}",
            role: "status",
            i { class: "fas fa-{kind.icon()}" }
            span { "{toast.notice.message}" }
        }
    }
}

#[component]
pub fn ConsentBannerView() -> Element {
    let mut site = use_site();
    if !site.read().consent().is_rendered() {
        return rsx! {};
    }
    let exiting = site.read().consent().is_exiting();

    rsx! {
        div {
            id: "cookieBanner",
            class: if exiting { "cookie-banner hiding" } else { "cookie-banner show" },
            role: "dialog",
            aria_label: "Consenso cookie",
            button {
                class: "cookie-banner-close",
                aria_label: "Chiudi",
                onclick: move |_| site.write().close_banner(),
                "×"
            }
            div { class: "cookie-banner-content",
                h4 { i { class: "fas fa-cookie-bite" } " Questo sito usa i cookie" }
                p {
                    "Usiamo cookie tecnici e, con il tuo consenso, cookie di analisi di terze parti. "
                    Link { to: Route::Privacy {}, "Leggi l'informativa" }
                }
            }
            div { class: "cookie-banner-actions",
                button { class: "btn btn-secondary", onclick: move |_| site.write().reject_all(), "Rifiuta" }
                button { class: "btn btn-outline", onclick: move |_| site.write().customize_cookies(), "Personalizza" }
                button { class: "btn btn-primary", onclick: move |_| site.write().accept_all(), "Accetta tutti" }
            }
        }
    }
}

#[component]
fn Modal(id: &'static str, title: String, children: Element) -> Element {
    let mut site = use_site();
    let open = site.read().modals().is_open(id);

    rsx! {
        div {
            id: "{id}",
            class: if open { "modal show" } else { "modal" },
            aria_hidden: "{!open}",
            onclick: move |_| site.write().close_modal(id),
            div {
                class: "modal-content",
                onclick: move |event| {
                    event.stop_propagation();
                    site.write().document_click(ClickRegion::Elsewhere);
                },
                div { class: "modal-header",
                    h3 { "{title}" }
                    button {
                        class: "modal-close",
                        aria_label: "Chiudi",
                        onclick: move |_| site.write().close_modal(id),
                        "×"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

#[component]
pub fn CookieSettingsModal() -> Element {
    let mut site = use_site();
    let mut analytics = use_signal(|| site.peek().consent().analytics_allowed());
    let open = use_memo(move || site.read().modals().is_open(COOKIE_SETTINGS_MODAL));

    use_effect(move || {
        if open() {
            analytics.set(site.peek().consent().analytics_allowed());
        }
    });

    rsx! {
        Modal { id: COOKIE_SETTINGS_MODAL, title: "Impostazioni cookie",
            div { class: "cookie-option",
                label {
                    input { r#type: "checkbox", checked: true, disabled: true }
                    " Cookie tecnici (sempre attivi)"
                }
            }
            div { class: "cookie-option",
                label {
                    input {
                        r#type: "checkbox",
                        checked: analytics(),
                        onchange: move |event| analytics.set(event.checked()),
                    }
                    " Cookie di analisi di terze parti"
                }
            }
            div { class: "modal-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| site.write().save_cookie_settings(analytics()),
                    "Salva preferenze"
                }
            }
        }
    }
}

const GLOSSARY: [(&str, &str); 5] = [
    ("Cookie", "Piccolo file di testo che un sito salva nel browser."),
    ("Prima parte", "Cookie impostato dal dominio che stai visitando."),
    ("Terza parte", "Cookie impostato da un dominio diverso, spesso un servizio pubblicitario."),
    ("Tracker", "Script che riconosce lo stesso utente su siti diversi."),
    ("Consenso", "Scelta esplicita dell'utente richiesta da GDPR e direttiva ePrivacy."),
];

#[component]
pub fn GlossaryModal() -> Element {
    rsx! {
        Modal { id: GLOSSARY_MODAL, title: "Glossario",
            dl { class: "glossary",
                for (term , definition) in GLOSSARY {
                    dt { "{term}" }
                    dd { "{definition}" }
                }
            }
        }
    }
}

/// A page section that lights up while the URL hash points at it.
#[component]
pub fn Section(id: String, title: String, children: Element) -> Element {
    let site = use_site();
    let highlighted = site.read().highlight().active_section() == Some(id.as_str());

    rsx! {
        section {
            id: "{id}",
            class: if highlighted { "content-section highlight" } else { "content-section" },
            h2 { "{title}" }
            {children}
        }
    }
}

#[component]
pub fn CodeBlock(id: String, code: String) -> Element {
    let site = use_site();
    let target = id.clone();

    rsx! {
        div { class: "code-block",
            button {
                class: "copy-btn",
                "data-copy-target": "{id}",
                aria_label: "Copia codice",
                onclick: move |_| copy_code(site, &target, &code),
                i { class: "fas fa-copy" }
            }
            pre { code { id: "{id}", "{code}" } }
        }
    }
}

/// Stagger index for `.fade-in` cards.
#[component]
pub fn FadeIn(index: usize, children: Element) -> Element {
    let delay = fade_in_delay(index);
    rsx! {
        div {
            class: "fade-in",
            style: "animation-delay: {delay}",
            {children}
        }
    }
}

#[component]
pub fn ShareButton() -> Element {
    let site = use_site();
    rsx! {
        button { class: "btn btn-outline share-btn", onclick: move |_| share_page(site),
            i { class: "fas fa-share-alt" }
            " Condividi"
        }
    }
}

fn copy_code(site: Signal<LiveSite>, target: &str, fallback: &str) {
    #[cfg(target_arch = "wasm32")]
    let text = crate::clipboard::element_text(target).unwrap_or_else(|| fallback.to_string());
    #[cfg(not(target_arch = "wasm32"))]
    let text = {
        let _ = target;
        fallback.to_string()
    };
    copy_text(site, CopySubject::Code, text);
}

pub fn copy_text(site: Signal<LiveSite>, subject: CopySubject, text: String) {
    #[cfg(target_arch = "wasm32")]
    spawn(async move {
        let result = crate::clipboard::write_clipboard(&text).await;
        if let Err(err) = &result {
            tracing::warn!("clipboard: {err}");
        }
        let mut site = site;
        site.write().notify(copy_notice(subject, &result));
    });
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = text;
        let mut site = site;
        let result = Err(crate::clipboard::ClipboardError::Unavailable);
        site.write().notify(copy_notice(subject, &result));
    }
}

fn share_page(site: Signal<LiveSite>) {
    #[cfg(target_arch = "wasm32")]
    {
        let url = crate::dom::current_url().unwrap_or_default();
        let request = site.read().share_request(&url);
        spawn(crate::clipboard::share_or_copy(request, move |notice| {
            let mut site = site;
            site.write().notify(notice);
        }));
    }
    #[cfg(not(target_arch = "wasm32"))]
    copy_text(site, CopySubject::SharedLink, String::new());
}
