//! Page-audio session for the viewer page.
//!
//! Wires [`PageAudioSync`] to the dFlip widget and the audio gate: load the
//! widget scripts, wait out the grace delay, then hook or poll. The session
//! lives until the page is hidden.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::PROBE_AUDIO;
use crate::config::sync_timing::{HOOK_GRACE_DELAY_MS, POLL_INTERVAL_MS};
use crate::core::{AudioGate, PageAudioSync, PageEvent, SyncMode};
use crate::utils::dom;
use crate::utils::{DflipWidget, HtmlAudioOutput, HttpFetcher};

pub struct ViewerSession {
    sync: RefCell<PageAudioSync>,
    gate: AudioGate<HtmlAudioOutput, HttpFetcher>,
    widget: DflipWidget,
    polling: RefCell<Option<Interval>>,
    mode: RwSignal<SyncMode>,
}

impl ViewerSession {
    /// Start syncing audio for the book already in the DOM.
    ///
    /// `mode` mirrors the detection mode for the status line.
    pub fn start(audio_base: String, mode: RwSignal<SyncMode>) {
        let session = Rc::new(Self {
            sync: RefCell::new(PageAudioSync::new(audio_base)),
            gate: AudioGate::new(HtmlAudioOutput::new(), HttpFetcher::new(), PROBE_AUDIO),
            widget: DflipWidget,
            polling: RefCell::new(None),
            mode,
        });

        let unlocking = session.clone();
        dom::once_on_click(move || {
            spawn_local(async move {
                unlocking.gate.unlock().await;
            });
        });

        let closing = session.clone();
        dom::on_page_hide(move || closing.teardown());

        spawn_local(async move {
            if let Err(e) = DflipWidget::ensure_loaded().await {
                log::error!(target: "sync", "paging widget unavailable: {}", e);
            }
            TimeoutFuture::new(HOOK_GRACE_DELAY_MS).await;
            session.attach();
        });
    }

    fn attach(self: &Rc<Self>) {
        if self.sync.borrow().mode() == SyncMode::Detached {
            log::debug!(target: "sync", "page hidden before attach");
            return;
        }

        let weak = Rc::downgrade(self);
        let mode = self.sync.borrow_mut().attach(&self.widget, move |event| {
            if let Some(session) = weak.upgrade() {
                session.on_event(event);
            }
        });

        if mode == SyncMode::Polling {
            let weak = Rc::downgrade(self);
            let interval = Interval::new(POLL_INTERVAL_MS, move || {
                if let Some(session) = weak.upgrade() {
                    session.tick();
                }
            });
            self.polling.replace(Some(interval));
        }

        self.mode.set(mode);
    }

    fn on_event(self: &Rc<Self>, event: PageEvent) {
        let url = self.sync.borrow_mut().on_event(event);
        if let Some(url) = url {
            self.play(url);
        }
    }

    fn tick(self: &Rc<Self>) {
        let url = self.sync.borrow_mut().poll(&self.widget);
        if let Some(url) = url {
            self.play(url);
        }
    }

    fn play(self: &Rc<Self>, url: String) {
        let session = self.clone();
        spawn_local(async move {
            let outcome = session.gate.play(&url).await;
            log::debug!(target: "sync", "{} -> {:?}", url, outcome);
        });
    }

    /// Stop audio and polling. Runs on `pagehide` and `beforeunload`.
    fn teardown(&self) {
        // Dropping the interval cancels it
        self.polling.borrow_mut().take();
        self.sync.borrow_mut().teardown();
        self.gate.stop();
        self.mode.set(SyncMode::Detached);
    }
}
