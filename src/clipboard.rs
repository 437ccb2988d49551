//! Clipboard and share-sheet helpers. Browser calls live behind
//! `target_arch = "wasm32"`; the outcome-to-notice mapping is shared.

use thiserror::Error;

use crate::notify::Notice;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share sheet unavailable")]
    Unsupported,
    #[error("share failed: {0}")]
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopySubject {
    Code,
    Text,
    /// The page URL copied because no share sheet exists.
    SharedLink,
}

pub fn copy_notice(subject: CopySubject, result: &Result<(), ClipboardError>) -> Notice {
    match (subject, result) {
        (CopySubject::Code, Ok(())) => Notice::success("Codice copiato negli appunti!"),
        (CopySubject::Code, Err(_)) => Notice::error("Errore nella copia del codice"),
        (CopySubject::Text, Ok(())) => Notice::success("Copiato negli appunti!"),
        (CopySubject::SharedLink, Ok(())) => {
            Notice::info("Link copiato! Condividilo manualmente.")
        }
        (CopySubject::Text | CopySubject::SharedLink, Err(_)) => {
            Notice::error("Errore nella copia")
        }
    }
}

pub fn shared_notice() -> Notice {
    Notice::success("Contenuto condiviso con successo!")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[cfg(target_arch = "wasm32")]
pub async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let clipboard = window.navigator().clipboard();
    let promise = clipboard.write_text(text);
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|err| ClipboardError::WriteFailed(format!("{err:?}")))?;
    Ok(())
}

/// Text content of the element with `id`, as rendered.
#[cfg(target_arch = "wasm32")]
pub fn element_text(id: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .text_content()
}

#[cfg(target_arch = "wasm32")]
fn share_function() -> Option<(web_sys::Navigator, js_sys::Function)> {
    use wasm_bindgen::{JsCast, JsValue};

    let navigator = web_sys::window()?.navigator();
    let share = js_sys::Reflect::get(&navigator, &JsValue::from_str("share")).ok()?;
    let share = share.dyn_into::<js_sys::Function>().ok()?;
    Some((navigator, share))
}

#[cfg(target_arch = "wasm32")]
pub async fn share(request: &ShareRequest) -> Result<(), ShareError> {
    use wasm_bindgen::{JsCast, JsValue};

    let (navigator, share) = share_function().ok_or(ShareError::Unsupported)?;
    let data = js_sys::Object::new();
    for (key, value) in [
        ("title", &request.title),
        ("text", &request.text),
        ("url", &request.url),
    ] {
        js_sys::Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value))
            .map_err(|err| ShareError::Failed(format!("{err:?}")))?;
    }
    let promise = share
        .call1(&navigator, &data)
        .map_err(|err| ShareError::Failed(format!("{err:?}")))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| ShareError::Failed("share did not return a promise".to_string()))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|err| ShareError::Failed(format!("{err:?}")))?;
    Ok(())
}

/// Native share sheet when present, otherwise (or when it fails) the URL is
/// copied. Every outcome ends in exactly one notice.
#[cfg(target_arch = "wasm32")]
pub async fn share_or_copy(request: ShareRequest, mut notify: impl FnMut(Notice)) {
    match share(&request).await {
        Ok(()) => notify(shared_notice()),
        Err(ShareError::Unsupported) => {
            let result = write_clipboard(&request.url).await;
            notify(copy_notice(CopySubject::SharedLink, &result));
        }
        Err(err) => {
            tracing::error!("share: {err}");
            let result = write_clipboard(&request.url).await;
            notify(copy_notice(CopySubject::Text, &result));
        }
    }
}
