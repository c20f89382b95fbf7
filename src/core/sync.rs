//! Page-change detection for the viewer.
//!
//! The paging widget either lets us register a page-change callback (hook
//! mode) or it doesn't, in which case the current page is polled. Both paths
//! funnel into [`PageAudioSync::observe`], which decides whether a new clip
//! should start.

use super::error::HookError;

/// How page changes are detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// Before the grace delay.
    #[default]
    Unattached,
    HookAttached,
    Polling,
    /// After teardown. Terminal.
    Detached,
}

impl SyncMode {
    /// Whether page changes currently trigger playback.
    pub fn is_live(self) -> bool {
        matches!(self, Self::HookAttached | Self::Polling)
    }
}

/// A page-change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageEvent {
    /// Page as reported by the widget. `None` when the event carried none.
    pub page: Option<u32>,
}

type Observer<E> = Box<dyn Fn(&E)>;

/// Ordered list of callbacks sharing one notification source.
///
/// Observers run in insertion order. Used to keep a page-change handler that
/// was installed before ours.
pub struct ObserverChain<E> {
    observers: Vec<Observer<E>>,
}

impl<E> ObserverChain<E> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn push(&mut self, observer: impl Fn(&E) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn notify(&self, event: &E) {
        for observer in &self.observers {
            observer(event);
        }
    }
}

impl<E> Default for ObserverChain<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// The paging widget, as seen by the sync state machine.
pub trait PagingWidget {
    /// Register `observer` for page-change notifications, keeping any
    /// handler already installed.
    fn attach(&self, observer: Box<dyn Fn(PageEvent)>) -> Result<(), HookError>;

    /// Page currently displayed, if the widget is ready.
    fn current_page(&self) -> Option<u32>;
}

/// Audio clip URL for `page` under `audio_base`.
pub fn audio_url(audio_base: &str, page: u32) -> String {
    format!("{}/audio-{}.mp3", audio_base.trim_end_matches('/'), page)
}

/// Decides when a page change should trigger playback.
#[derive(Clone, Debug)]
pub struct PageAudioSync {
    audio_base: String,
    last_played: Option<u32>,
    mode: SyncMode,
}

impl PageAudioSync {
    pub fn new(audio_base: impl Into<String>) -> Self {
        Self {
            audio_base: audio_base.into(),
            last_played: None,
            mode: SyncMode::Unattached,
        }
    }

    /// Record the result of trying to hook the widget.
    ///
    /// Only the first call has an effect: once a mode is chosen it stays,
    /// and a detached sync never attaches again.
    pub fn connect(&mut self, attached: Result<(), HookError>) -> SyncMode {
        if self.mode != SyncMode::Unattached {
            return self.mode;
        }

        self.mode = match attached {
            Ok(()) => {
                log::info!(target: "sync", "page-change hook attached");
                SyncMode::HookAttached
            }
            Err(err) => {
                log::info!(target: "sync", "{}, polling instead", err);
                SyncMode::Polling
            }
        };
        self.mode
    }

    /// Attach to `widget`, routing hook notifications to `on_page`.
    pub fn attach<W: PagingWidget>(
        &mut self,
        widget: &W,
        on_page: impl Fn(PageEvent) + 'static,
    ) -> SyncMode {
        if self.mode != SyncMode::Unattached {
            return self.mode;
        }
        let attached = widget.attach(Box::new(on_page));
        self.connect(attached)
    }

    /// Feed a page number. Returns the clip URL when playback should start.
    pub fn observe(&mut self, page: Option<u32>) -> Option<String> {
        if !self.mode.is_live() {
            return None;
        }

        let page = page?;
        if self.last_played == Some(page) {
            return None;
        }

        self.last_played = Some(page);
        let url = audio_url(&self.audio_base, page);
        log::debug!(target: "sync", "page {} -> {}", page, url);
        Some(url)
    }

    /// Hook notification entry point.
    pub fn on_event(&mut self, event: PageEvent) -> Option<String> {
        if self.mode != SyncMode::HookAttached {
            return None;
        }
        self.observe(event.page)
    }

    /// One polling tick. Does nothing unless in polling mode.
    pub fn poll<W: PagingWidget>(&mut self, widget: &W) -> Option<String> {
        if self.mode != SyncMode::Polling {
            return None;
        }
        self.observe(widget.current_page())
    }

    /// Stop reacting to page changes for good.
    pub fn teardown(&mut self) {
        if self.mode != SyncMode::Detached {
            log::debug!(target: "sync", "detached ({:?})", self.mode);
        }
        self.mode = SyncMode::Detached;
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn last_played(&self) -> Option<u32> {
        self.last_played
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    /// Widget whose hook support is switchable and whose page is scripted.
    struct FakeWidget {
        hookable: bool,
        page: Cell<Option<u32>>,
        observers: RefCell<ObserverChain<PageEvent>>,
    }

    impl FakeWidget {
        fn new(hookable: bool) -> Self {
            Self {
                hookable,
                page: Cell::new(None),
                observers: RefCell::new(ObserverChain::new()),
            }
        }

        fn turn_to(&self, page: u32) {
            self.page.set(Some(page));
            self.observers.borrow().notify(&PageEvent { page: Some(page) });
        }
    }

    impl PagingWidget for FakeWidget {
        fn attach(&self, observer: Box<dyn Fn(PageEvent)>) -> Result<(), HookError> {
            if !self.hookable {
                return Err(HookError::Unattached("no DFLIP.defaults".to_string()));
            }
            self.observers.borrow_mut().push(move |e: &PageEvent| observer(*e));
            Ok(())
        }

        fn current_page(&self) -> Option<u32> {
            self.page.get()
        }
    }

    #[test]
    fn test_audio_url() {
        assert_eq!(audio_url("./audio", 3), "./audio/audio-3.mp3");
        assert_eq!(audio_url("./audio/", 12), "./audio/audio-12.mp3");
    }

    #[test]
    fn test_polling_scenario() {
        let widget = FakeWidget::new(false);
        let mut sync = PageAudioSync::new("./audio");
        assert_eq!(sync.attach(&widget, |_| {}), SyncMode::Polling);

        let mut triggered = Vec::new();
        for page in [1, 1, 2, 2, 3] {
            widget.page.set(Some(page));
            triggered.extend(sync.poll(&widget));
        }

        assert_eq!(
            triggered,
            [
                "./audio/audio-1.mp3",
                "./audio/audio-2.mp3",
                "./audio/audio-3.mp3"
            ]
        );
        assert_eq!(sync.last_played(), Some(3));
    }

    #[test]
    fn test_hook_mode_does_not_poll() {
        let widget = FakeWidget::new(true);
        let sync = Rc::new(RefCell::new(PageAudioSync::new("./a")));
        let urls = Rc::new(RefCell::new(Vec::new()));

        let (s, u) = (sync.clone(), urls.clone());
        let mode = sync.borrow_mut().attach(&widget, move |event| {
            u.borrow_mut().extend(s.borrow_mut().on_event(event));
        });
        assert_eq!(mode, SyncMode::HookAttached);

        widget.turn_to(2);
        widget.turn_to(2);
        assert_eq!(sync.borrow_mut().poll(&widget), None);
        widget.turn_to(5);

        assert_eq!(*urls.borrow(), ["./a/audio-2.mp3", "./a/audio-5.mp3"]);
    }

    #[test]
    fn test_mode_is_chosen_once() {
        let mut sync = PageAudioSync::new("./audio");
        assert_eq!(
            sync.connect(Err(HookError::Unattached("x".to_string()))),
            SyncMode::Polling
        );
        assert_eq!(sync.connect(Ok(())), SyncMode::Polling);
    }

    #[test]
    fn test_events_without_page_ignored() {
        let mut sync = PageAudioSync::new("./audio");
        sync.connect(Ok(()));
        assert_eq!(sync.on_event(PageEvent { page: None }), None);
        assert_eq!(sync.last_played(), None);
    }

    #[test]
    fn test_page_numbers_passed_through() {
        let mut sync = PageAudioSync::new("./audio");
        sync.connect(Ok(()));
        assert_eq!(
            sync.on_event(PageEvent { page: Some(0) }).as_deref(),
            Some("./audio/audio-0.mp3")
        );
    }

    #[test]
    fn test_nothing_before_attach_or_after_teardown() {
        let widget = FakeWidget::new(false);
        widget.page.set(Some(1));
        let mut sync = PageAudioSync::new("./audio");
        assert_eq!(sync.observe(Some(1)), None);

        sync.attach(&widget, |_| {});
        assert!(sync.poll(&widget).is_some());

        sync.teardown();
        widget.page.set(Some(2));
        assert_eq!(sync.poll(&widget), None);
        assert_eq!(sync.mode(), SyncMode::Detached);
    }

    #[test]
    fn test_no_attach_after_teardown() {
        let widget = FakeWidget::new(false);
        widget.page.set(Some(4));
        let mut sync = PageAudioSync::new("./audio");

        // Page hidden before the grace delay ran out.
        sync.teardown();
        assert_eq!(sync.attach(&widget, |_| {}), SyncMode::Detached);
        assert_eq!(sync.poll(&widget), None);
        assert_eq!(sync.connect(Ok(())), SyncMode::Detached);
        assert_eq!(sync.on_event(PageEvent { page: Some(4) }), None);

        let hookable = FakeWidget::new(true);
        assert_eq!(sync.attach(&hookable, |_| {}), SyncMode::Detached);
        hookable.turn_to(5);
        assert_eq!(sync.last_played(), None);
    }

    #[test]
    fn test_observer_chain_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut chain = ObserverChain::new();

        let c = calls.clone();
        chain.push(move |page: &u32| c.borrow_mut().push(format!("sync {}", page)));
        let c = calls.clone();
        chain.push(move |page: &u32| c.borrow_mut().push(format!("previous {}", page)));

        chain.notify(&4);
        assert_eq!(*calls.borrow(), ["sync 4", "previous 4"]);
    }
}
