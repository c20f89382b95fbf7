//! dFlip paging widget adapter.
//!
//! dFlip is a jQuery plugin configured through `window.DFLIP`. Page changes
//! are reported through `DFLIP.defaults.onPageChanged(app)`, and the live
//! book instances are listed in `DFLIP.apps`.

use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;

use super::dom::{js_global, load_script};
use crate::config::widget::{DFLIP_SCRIPT, JQUERY_SCRIPT};
use crate::core::error::HookError;
use crate::core::{ObserverChain, PageEvent, PagingWidget};

const HOOK: &str = "onPageChanged";

/// Handle on the global dFlip instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct DflipWidget;

impl DflipWidget {
    /// Load jQuery and dFlip unless the host page already did.
    pub async fn ensure_loaded() -> Result<(), String> {
        if js_global(&["jQuery"]).is_none() {
            log::info!(target: "sync", "injecting {}", JQUERY_SCRIPT);
            load_script(JQUERY_SCRIPT).await?;
        }
        if js_global(&["DFLIP"]).is_none() {
            log::info!(target: "sync", "injecting {}", DFLIP_SCRIPT);
            load_script(DFLIP_SCRIPT).await?;
        }
        Ok(())
    }
}

/// `app.currentPageNumber`, when it is a non-negative integer.
fn page_of(app: &JsValue) -> Option<u32> {
    let value = Reflect::get(app, &JsValue::from_str("currentPageNumber"))
        .ok()?
        .as_f64()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

impl PagingWidget for DflipWidget {
    fn attach(&self, observer: Box<dyn Fn(PageEvent)>) -> Result<(), HookError> {
        let defaults = js_global(&["DFLIP", "defaults"])
            .ok_or_else(|| HookError::Unattached("DFLIP.defaults not found".to_string()))?;

        let mut chain = ObserverChain::new();
        chain.push(move |app: &JsValue| observer(PageEvent { page: page_of(app) }));

        if let Some(previous) = Reflect::get(&defaults, &JsValue::from_str(HOOK))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
        {
            chain.push(move |app: &JsValue| {
                if let Err(e) = previous.call1(&JsValue::UNDEFINED, app) {
                    log::warn!(target: "sync", "previous page handler failed: {:?}", e);
                }
            });
        }

        let closure = Closure::<dyn Fn(JsValue)>::new(move |app: JsValue| chain.notify(&app));
        Reflect::set(&defaults, &JsValue::from_str(HOOK), closure.as_ref())
            .map_err(|e| HookError::Unattached(format!("{:?}", e)))?;

        // dFlip keeps calling this for the rest of the page
        closure.forget();
        Ok(())
    }

    fn current_page(&self) -> Option<u32> {
        let apps = js_global(&["DFLIP", "apps"])?;
        let first = Reflect::get_u32(&apps, 0).ok()?;
        if first.is_undefined() {
            return None;
        }
        page_of(&first)
    }
}
