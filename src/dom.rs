//! Window listeners and the handful of document mutations the site makes
//! outside the rendered tree. Every call degrades to a no-op when the
//! window or document is missing, and natively.

use crate::theme::Theme;

/// What the window-level listeners report back to the site.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    Resized(u32),
    Scrolled(f64),
    EscapePressed,
    HashChanged(String),
    ScriptError(String),
}

#[cfg(target_arch = "wasm32")]
pub use browser::*;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::rc::Rc;

    use wasm_bindgen::{closure::Closure, JsCast};

    use super::WindowEvent;

    type Listener = Rc<Closure<dyn FnMut(web_sys::Event)>>;

    /// Listeners registered on `window`; [`WindowListeners::detach`] removes
    /// them again.
    pub struct WindowListeners {
        handlers: Vec<(&'static str, Listener)>,
    }

    impl WindowListeners {
        pub fn attach(on_event: impl Fn(WindowEvent) + 'static) -> Option<Self> {
            let window = web_sys::window()?;
            let on_event: Rc<dyn Fn(WindowEvent)> = Rc::new(on_event);
            let mut handlers: Vec<(&'static str, Listener)> = Vec::new();

            let emit = on_event.clone();
            handlers.push((
                "resize",
                listener(move |_| {
                    if let Some(width) = viewport_width() {
                        emit(WindowEvent::Resized(width));
                    }
                }),
            ));

            let emit = on_event.clone();
            handlers.push((
                "scroll",
                listener(move |_| {
                    if let Some(window) = web_sys::window() {
                        emit(WindowEvent::Scrolled(window.scroll_y().unwrap_or_default()));
                    }
                }),
            ));

            let emit = on_event.clone();
            handlers.push((
                "keydown",
                listener(move |event| {
                    let escape = event
                        .dyn_ref::<web_sys::KeyboardEvent>()
                        .is_some_and(|key| key.key() == "Escape");
                    if escape {
                        emit(WindowEvent::EscapePressed);
                    }
                }),
            ));

            let emit = on_event.clone();
            handlers.push((
                "hashchange",
                listener(move |_| emit(WindowEvent::HashChanged(current_hash()))),
            ));

            let emit = on_event;
            handlers.push((
                "error",
                listener(move |event| {
                    let message = event
                        .dyn_ref::<web_sys::ErrorEvent>()
                        .map(|error| error.message())
                        .unwrap_or_else(|| "unknown error".to_string());
                    emit(WindowEvent::ScriptError(message));
                }),
            ));

            for (name, handler) in &handlers {
                let _ = window.add_event_listener_with_callback(
                    name,
                    handler.as_ref().as_ref().unchecked_ref(),
                );
            }
            tracing::debug!("dom: {} window listeners attached", handlers.len());
            Some(Self { handlers })
        }

        pub fn detach(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            for (name, handler) in &self.handlers {
                let _ = window.remove_event_listener_with_callback(
                    name,
                    handler.as_ref().as_ref().unchecked_ref(),
                );
            }
        }
    }

    fn listener(handler: impl FnMut(web_sys::Event) + 'static) -> Listener {
        Rc::new(Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>))
    }

    pub fn viewport_width() -> Option<u32> {
        let width = web_sys::window()?.inner_width().ok()?.as_f64()?;
        Some(width.max(0.0) as u32)
    }

    pub fn current_hash() -> String {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default()
    }

    pub fn current_url() -> Option<String> {
        web_sys::window()?.location().href().ok()
    }
}

pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        else {
            return;
        };
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

/// `overflow: hidden` on the body while a modal is open.
pub fn lock_scroll(locked: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(body) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
        else {
            return;
        };
        let overflow = if locked { "hidden" } else { "auto" };
        let _ = body.style().set_property("overflow", overflow);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = locked;
}

pub fn scroll_to_section(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(element) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
        else {
            tracing::debug!("dom: no section `{id}` to scroll to");
            return;
        };
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}
