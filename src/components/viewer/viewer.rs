//! Viewer page: the flipbook plus page-synchronized audio.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::session::ViewerSession;
use crate::components::icons as ic;
use crate::config::widget::{BOOK_CLASS, BOOK_ELEMENT_ID};
use crate::core::{LaunchParameters, SyncMode};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/viewer/viewer.module.css");

fn mode_label(mode: SyncMode) -> &'static str {
    match mode {
        SyncMode::Unattached => "Audio: waiting for book",
        SyncMode::HookAttached => "Audio: following page turns",
        SyncMode::Polling => "Audio: watching pages",
        SyncMode::Detached => "Audio: stopped",
    }
}

#[component]
pub fn Viewer(params: LaunchParameters) -> impl IntoView {
    let heading = format!("Viewing: {}", params.title);
    dom::set_title(&heading);

    let mode = RwSignal::new(SyncMode::Unattached);
    let book_ref = NodeRef::<leptos::html::Div>::new();

    // The widget reads `source` when it scans for books, so the attribute
    // has to be in place before the session loads it.
    let LaunchParameters {
        source, audio_base, ..
    } = params;
    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(book) = book_ref.get() else {
            return false;
        };

        if let Err(e) = book.set_attribute("source", &source) {
            log::error!(target: "sync", "cannot set book source: {:?}", e);
            return true;
        }
        ViewerSession::start(audio_base.clone(), mode);
        true
    });

    view! {
        <div class=css::viewer>
            <header class=css::header>
                <span class=css::title>{heading}</span>
                <span class=css::status>
                    <Icon icon=ic::AUDIO />
                    {move || mode_label(mode.get())}
                </span>
            </header>
            <div class=css::bookContainer>
                <div class=BOOK_CLASS id=BOOK_ELEMENT_ID node_ref=book_ref></div>
            </div>
        </div>
    }
}
