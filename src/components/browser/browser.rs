//! Browser page.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::{FileList, Header};
use crate::config::{DEFAULT_AUDIO_BASE, VIEWER_PAGE};
use crate::core::{DirectoryBrowser, Navigation};
use crate::models::BrowseItem;
use crate::utils::HttpFetcher;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/browser/browser.module.css");

/// Browser page state shared by the header and the listing.
///
/// `Copy` because every field is a signal.
#[derive(Clone, Copy)]
pub struct BrowserContext {
    pub browser: RwSignal<DirectoryBrowser>,
    /// Audio folder override typed by the reader.
    pub audio_base: RwSignal<String>,
}

impl BrowserContext {
    pub fn new() -> Self {
        Self {
            browser: RwSignal::new(DirectoryBrowser::default()),
            audio_base: RwSignal::new(DEFAULT_AUDIO_BASE.to_string()),
        }
    }

    /// Start a navigation; the result is committed when it arrives unless a
    /// newer one was started meanwhile.
    pub fn navigate(&self, request: Navigation) {
        let browser = self.browser;
        let Some(pending) = browser.try_update(|b| b.begin(request)).flatten() else {
            return;
        };

        spawn_local(async move {
            let resolved = pending.run(&HttpFetcher::new()).await;
            browser.update(|b| {
                b.commit(resolved);
            });
        });
    }

    /// Open a file in the viewer, in a new tab.
    pub fn open(&self, item: &BrowseItem) {
        let audio_base = self.audio_base.get_untracked();
        let Some(params) = self
            .browser
            .with_untracked(|b| b.select(item, Some(&audio_base)))
        else {
            return;
        };

        let url = params.viewer_url(VIEWER_PAGE);
        if !dom::open_in_new_context(&url) {
            log::warn!(target: "browser", "popup blocked for {}", url);
        }
    }
}

impl Default for BrowserContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Folder browser: header with breadcrumb and Back, then the listing.
#[component]
pub fn Browser() -> impl IntoView {
    let ctx = BrowserContext::new();
    provide_context(ctx);

    ctx.navigate(Navigation::Initialize);

    view! {
        <main class=css::browser>
            <Header />
            <FileList />
        </main>
    }
}
