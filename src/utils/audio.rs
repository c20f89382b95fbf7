//! Browser audio backend.
//!
//! Clips play through detached `HtmlAudioElement`s. The `AudioContext` only
//! exists to be resumed on the first user gesture, which lifts the autoplay
//! restriction for the rest of the session.

use std::cell::RefCell;

use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, AudioContextState, HtmlAudioElement};

use super::fetch::describe_js_error;
use crate::core::AudioOutput;
use crate::core::error::AudioError;

#[derive(Default)]
pub struct HtmlAudioOutput {
    context: RefCell<Option<AudioContext>>,
}

impl HtmlAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> Result<AudioContext, AudioError> {
        if let Some(context) = self.context.borrow().as_ref() {
            return Ok(context.clone());
        }

        let context =
            AudioContext::new().map_err(|e| AudioError::OutputUnavailable(describe_js_error(&e)))?;
        *self.context.borrow_mut() = Some(context.clone());
        Ok(context)
    }
}

impl AudioOutput for HtmlAudioOutput {
    type Handle = HtmlAudioElement;

    fn load(&self, url: &str) -> Result<HtmlAudioElement, AudioError> {
        let audio = HtmlAudioElement::new_with_src(url)
            .map_err(|e| AudioError::CreateFailed(describe_js_error(&e)))?;
        audio.set_preload("auto");
        audio.set_cross_origin(Some("anonymous"));
        Ok(audio)
    }

    async fn start(&self, handle: &HtmlAudioElement) -> Result<(), AudioError> {
        let promise = handle
            .play()
            .map_err(|e| AudioError::PlayRejected(describe_js_error(&e)))?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| AudioError::PlayRejected(describe_js_error(&e)))
    }

    fn halt(&self, handle: &HtmlAudioElement) {
        if let Err(e) = handle.pause() {
            log::debug!(target: "audio", "pause failed: {}", describe_js_error(&e));
        }
        handle.set_current_time(0.0);
    }

    async fn resume(&self) -> Result<(), AudioError> {
        let context = self.context()?;
        if context.state() == AudioContextState::Suspended {
            let promise = context
                .resume()
                .map_err(|e| AudioError::OutputUnavailable(describe_js_error(&e)))?;
            JsFuture::from(promise)
                .await
                .map_err(|e| AudioError::OutputUnavailable(describe_js_error(&e)))?;
        }
        log::info!(target: "audio", "output context {:?}", context.state());
        Ok(())
    }
}
