//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::{Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Document, HtmlScriptElement, Window};

use super::fetch::describe_js_error;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the document object.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Open `url` in a new browsing context.
///
/// Returns `false` when the browser blocked the popup.
pub fn open_in_new_context(url: &str) -> bool {
    window()
        .and_then(|w| w.open_with_url_and_target(url, "_blank").ok())
        .flatten()
        .is_some()
}

/// Set the document title.
pub fn set_title(title: &str) {
    if let Some(document) = document() {
        document.set_title(title);
    }
}

// =============================================================================
// JS Globals
// =============================================================================

/// Follow `path` from `window`, e.g. `["DFLIP", "defaults"]`.
///
/// Returns `None` as soon as a segment is `undefined` or `null`.
pub fn js_global(path: &[&str]) -> Option<JsValue> {
    let mut current: JsValue = window()?.into();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        if current.is_undefined() || current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Load a script by appending a `<script>` tag to the body.
///
/// Resolves once the script has executed.
pub async fn load_script(src: &str) -> Result<(), String> {
    let document = document().ok_or("document not available")?;
    let body = document.body().ok_or("document has no body")?;

    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| describe_js_error(&e))?
        .dyn_into()
        .map_err(|_| "created element is not a script".to_string())?;
    script.set_src(src);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    body.append_child(&script).map_err(|e| describe_js_error(&e))?;
    JsFuture::from(loaded)
        .await
        .map(|_| ())
        .map_err(|_| format!("failed to load {}", src))
}

// =============================================================================
// Event Helpers
// =============================================================================

/// Run `callback` when the page is hidden or unloaded.
///
/// Registered on both `pagehide` and `beforeunload`; `callback` must
/// tolerate being called twice.
pub fn on_page_hide(callback: impl Fn() + 'static) {
    let Some(window) = window() else {
        return;
    };

    let closure = Closure::<dyn Fn()>::new(callback);
    for event in ["pagehide", "beforeunload"] {
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }

    // Lives for the rest of the page
    closure.forget();
}

/// Run `callback` on the first click anywhere in the document.
pub fn once_on_click(callback: impl FnOnce() + 'static) {
    let Some(document) = document() else {
        return;
    };

    let closure = Closure::once(callback);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        closure.as_ref().unchecked_ref(),
        &options,
    );

    closure.forget();
}
