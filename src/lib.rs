//! Cookie Analytics Pro: the interactive layer of an Italian information
//! site about third-party cookies, rendered with Dioxus.
//!
//! [`site::Site`] holds all page state and is driven either by the browser
//! (timers from `gloo-timers`, storage in `localStorage`) or headlessly by a
//! [`scheduler::ManualScheduler`] in tests.

pub mod clipboard;
pub mod config;
pub mod consent;
pub mod demo;
pub mod dom;
pub mod hooks;
pub mod layout;
pub mod locale;
pub mod modal;
pub mod nav;
pub mod notify;
pub mod routes;
pub mod scan;
pub mod scheduler;
pub mod sidebar;
pub mod site;
pub mod storage;
pub mod theme;
