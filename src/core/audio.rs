//! Single active audio clip.
//!
//! [`AudioGate`] owns the one playing handle. Every `play` stops whatever is
//! playing first, so at most one clip is ever audible. A request that is
//! overtaken by a newer one while it waits on the network gives up.

use std::cell::{Cell, RefCell};

use super::error::{AudioError, ErrorKind};
use super::fetch::{Fetch, ProbeMethod};

/// What happened to a `play` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// No clip at the URL.
    Missing,
    /// A newer request took over.
    Superseded,
    /// Logged and dropped.
    Failed,
}

/// Audio playback backend.
#[allow(async_fn_in_trait)]
pub trait AudioOutput {
    type Handle: Clone;

    /// Create a handle for `url` without starting it.
    fn load(&self, url: &str) -> Result<Self::Handle, AudioError>;

    /// Start playback.
    async fn start(&self, handle: &Self::Handle) -> Result<(), AudioError>;

    /// Pause and rewind. Never fails.
    fn halt(&self, handle: &Self::Handle);

    /// Resume the output context after a user gesture.
    async fn resume(&self) -> Result<(), AudioError>;
}

struct Active<H> {
    url: String,
    handle: H,
}

/// Owner of the single active audio handle.
pub struct AudioGate<O: AudioOutput, F: Fetch> {
    output: O,
    fetcher: F,
    probe: bool,
    generation: Cell<u64>,
    active: RefCell<Option<Active<O::Handle>>>,
    unlocked: Cell<bool>,
}

impl<O: AudioOutput, F: Fetch> AudioGate<O, F> {
    /// `probe` enables the existence check before loading a clip.
    pub fn new(output: O, fetcher: F, probe: bool) -> Self {
        Self {
            output,
            fetcher,
            probe,
            generation: Cell::new(0),
            active: RefCell::new(None),
            unlocked: Cell::new(false),
        }
    }

    /// Stop the current clip and play `url`.
    pub async fn play(&self, url: &str) -> PlayOutcome {
        let ticket = self.advance();
        self.halt_active();

        if self.probe {
            match self.exists(url).await {
                Ok(true) => {}
                Ok(false) => {
                    log::info!(target: "audio", "{}", AudioError::Missing(url.to_string()));
                    return PlayOutcome::Missing;
                }
                Err(err) => {
                    log::warn!(target: "audio", "{}", err);
                    return PlayOutcome::Failed;
                }
            }
        }

        if self.is_stale(ticket) {
            log::debug!(target: "audio", "{} superseded before loading", url);
            return PlayOutcome::Superseded;
        }

        let handle = match self.output.load(url) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!(target: "audio", "{}", err);
                return PlayOutcome::Failed;
            }
        };
        self.active.replace(Some(Active {
            url: url.to_string(),
            handle: handle.clone(),
        }));

        match self.output.start(&handle).await {
            Ok(()) if self.is_stale(ticket) => PlayOutcome::Superseded,
            Ok(()) => {
                log::debug!(target: "audio", "playing {}", url);
                PlayOutcome::Started
            }
            Err(_) if self.is_stale(ticket) => PlayOutcome::Superseded,
            Err(err) => {
                log::warn!(target: "audio", "{}", err);
                PlayOutcome::Failed
            }
        }
    }

    /// Pause and rewind the active clip, if any. Requests still waiting on
    /// their existence check give up.
    pub fn stop(&self) {
        self.advance();
        self.halt_active();
    }

    fn halt_active(&self) {
        let previous = self.active.borrow_mut().take();
        if let Some(active) = previous {
            self.output.halt(&active.handle);
            log::debug!(target: "audio", "stopped {}", active.url);
        }
    }

    /// Resume the output context. Only the first call does anything;
    /// returns whether this call was the one.
    pub async fn unlock(&self) -> bool {
        if self.unlocked.replace(true) {
            return false;
        }
        if let Err(err) = self.output.resume().await {
            log::warn!(target: "audio", "{}", err);
        }
        true
    }

    /// URL of the clip currently owning the handle.
    #[cfg(test)]
    pub fn active_url(&self) -> Option<String> {
        self.active.borrow().as_ref().map(|a| a.url.clone())
    }

    fn advance(&self) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        ticket
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.generation.get() != ticket
    }

    /// HEAD first, then a two-byte range request for servers that reject
    /// HEAD.
    async fn exists(&self, url: &str) -> Result<bool, AudioError> {
        match self.fetcher.probe(url, ProbeMethod::Head).await {
            Ok(405 | 501) => {}
            Ok(status) => return Ok(is_success(status)),
            Err(err) => {
                log::debug!(target: "audio", "HEAD {} failed: {}", url, err);
            }
        }

        match self.fetcher.probe(url, ProbeMethod::Range).await {
            Ok(status) => Ok(is_success(status)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(AudioError::Probe(err)),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::core::error::FetchError;
    use crate::core::fetch::testing::FakeFetcher;

    /// Records every backend call as a string.
    #[derive(Clone, Default)]
    struct FakeOutput {
        log: Rc<RefCell<Vec<String>>>,
        reject: bool,
    }

    impl FakeOutput {
        fn calls(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    impl AudioOutput for FakeOutput {
        type Handle = String;

        fn load(&self, url: &str) -> Result<String, AudioError> {
            self.log.borrow_mut().push(format!("load {}", url));
            Ok(url.to_string())
        }

        async fn start(&self, handle: &String) -> Result<(), AudioError> {
            self.log.borrow_mut().push(format!("start {}", handle));
            if self.reject {
                return Err(AudioError::PlayRejected("NotAllowedError".to_string()));
            }
            Ok(())
        }

        fn halt(&self, handle: &String) {
            self.log.borrow_mut().push(format!("halt {}", handle));
        }

        async fn resume(&self) -> Result<(), AudioError> {
            self.log.borrow_mut().push("resume".to_string());
            Ok(())
        }
    }

    const ONE: &str = "./audio/audio-1.mp3";
    const TWO: &str = "./audio/audio-2.mp3";

    fn fetcher_with_clips() -> FakeFetcher {
        FakeFetcher::new()
            .with_status(ONE, ProbeMethod::Head, 200)
            .with_status(TWO, ProbeMethod::Head, 200)
    }

    #[tokio::test]
    async fn test_play_replaces_active_handle() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), fetcher_with_clips(), true);

        assert_eq!(gate.play(ONE).await, PlayOutcome::Started);
        assert_eq!(gate.play(TWO).await, PlayOutcome::Started);

        assert_eq!(gate.active_url().as_deref(), Some(TWO));
        assert_eq!(
            output.calls(),
            [
                format!("load {}", ONE),
                format!("start {}", ONE),
                format!("halt {}", ONE),
                format!("load {}", TWO),
                format!("start {}", TWO),
            ]
        );
    }

    #[tokio::test]
    async fn test_quick_plays_leave_second() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), fetcher_with_clips(), true);

        let (first, second) = tokio::join!(gate.play(ONE), gate.play(TWO));

        assert_eq!(first, PlayOutcome::Superseded);
        assert_eq!(second, PlayOutcome::Started);
        assert_eq!(gate.active_url().as_deref(), Some(TWO));
        assert!(!output.calls().contains(&format!("load {}", ONE)));
    }

    #[tokio::test]
    async fn test_stop_cancels_pending_play() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), fetcher_with_clips(), true);

        // The play suspends on its HEAD request; stop lands in between.
        let (outcome, ()) = tokio::join!(gate.play(ONE), async { gate.stop() });

        assert_eq!(outcome, PlayOutcome::Superseded);
        assert_eq!(gate.active_url(), None);
        assert!(output.calls().is_empty());
    }

    #[tokio::test]
    async fn test_play_after_stop_starts() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), fetcher_with_clips(), true);
        gate.stop();

        assert_eq!(gate.play(ONE).await, PlayOutcome::Started);
        assert_eq!(gate.active_url().as_deref(), Some(ONE));
    }

    #[tokio::test]
    async fn test_missing_clip() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), FakeFetcher::new(), true);

        assert_eq!(gate.play(ONE).await, PlayOutcome::Missing);
        assert_eq!(gate.active_url(), None);
        assert!(output.calls().is_empty());
    }

    #[tokio::test]
    async fn test_range_fallback_when_head_rejected() {
        let fetcher = FakeFetcher::new()
            .with_status(ONE, ProbeMethod::Head, 405)
            .with_status(ONE, ProbeMethod::Range, 206)
            .with_probe_error(TWO, ProbeMethod::Head, FetchError::NetworkError("blocked".into()))
            .with_status(TWO, ProbeMethod::Range, 206);
        let gate = AudioGate::new(FakeOutput::default(), fetcher, true);

        assert_eq!(gate.play(ONE).await, PlayOutcome::Started);
        assert_eq!(gate.play(TWO).await, PlayOutcome::Started);
        assert_eq!(
            gate.fetcher.requested(),
            [
                format!("Head {}", ONE),
                format!("Range {}", ONE),
                format!("Head {}", TWO),
                format!("Range {}", TWO),
            ]
        );
    }

    #[tokio::test]
    async fn test_probe_network_failure() {
        let fetcher = FakeFetcher::new()
            .with_probe_error(ONE, ProbeMethod::Head, FetchError::Timeout)
            .with_probe_error(ONE, ProbeMethod::Range, FetchError::Timeout);
        let gate = AudioGate::new(FakeOutput::default(), fetcher, true);
        assert_eq!(gate.play(ONE).await, PlayOutcome::Failed);
    }

    #[tokio::test]
    async fn test_probe_disabled() {
        let gate = AudioGate::new(FakeOutput::default(), FakeFetcher::new(), false);
        assert_eq!(gate.play(ONE).await, PlayOutcome::Started);
        assert!(gate.fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_play_is_failed() {
        let output = FakeOutput {
            reject: true,
            ..Default::default()
        };
        let gate = AudioGate::new(output, fetcher_with_clips(), true);
        assert_eq!(gate.play(ONE).await, PlayOutcome::Failed);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), fetcher_with_clips(), true);
        gate.play(ONE).await;

        gate.stop();
        gate.stop();
        assert_eq!(gate.active_url(), None);
        assert_eq!(
            output.calls().iter().filter(|c| c.starts_with("halt")).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_unlock_once() {
        let output = FakeOutput::default();
        let gate = AudioGate::new(output.clone(), FakeFetcher::new(), true);

        assert!(gate.unlock().await);
        assert!(!gate.unlock().await);
        assert_eq!(output.calls(), ["resume"]);
    }
}
