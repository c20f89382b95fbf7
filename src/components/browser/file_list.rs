//! Folder listing.
//!
//! Items render in source order. Folders navigate on click; files open the
//! viewer on click or through their explicit "Open" button.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::BrowserContext;
use crate::components::icons as ic;
use crate::config::EMPTY_LISTING_TEXT;
use crate::core::{BrowserState, Navigation};
use crate::models::BrowseItem;

stylance::import_crate_style!(css, "src/components/browser/file_list.module.css");

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let loading = Memo::new(move |_| ctx.browser.with(|b| *b.state() == BrowserState::Loading));
    let message = Memo::new(move |_| ctx.browser.with(|b| b.message().map(str::to_string)));
    let items = Memo::new(move |_| ctx.browser.with(|b| b.items().to_vec()));

    view! {
        <div class=css::list role="list" aria-label="Folder contents">
            {move || {
                if loading.get() {
                    view! { <p class=css::notice>"Loading..."</p> }.into_any()
                } else if let Some(text) = message.get() {
                    view! { <p class=css::notice>{text}</p> }.into_any()
                } else if items.with(|i| i.is_empty()) {
                    view! { <p class=css::notice>{EMPTY_LISTING_TEXT}</p> }.into_any()
                } else {
                    view! {
                        <For
                            each=move || items.get().into_iter().enumerate()
                            key=|(index, item)| (*index, item.href.clone())
                            children=move |(_, item)| view! { <FileListItem item=item /> }
                        />
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn FileListItem(item: BrowseItem) -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let is_dir = item.is_dir;
    let icon = ic::for_item(&item.name, is_dir);
    let display_name = if is_dir {
        format!("{}/", item.name)
    } else {
        item.name.clone()
    };
    let aria_label = if is_dir {
        format!("Folder: {}", item.name)
    } else {
        format!("File: {}", item.name)
    };

    let clicked = item.clone();
    let handle_click = move |_: leptos::ev::MouseEvent| {
        if clicked.is_dir {
            ctx.navigate(Navigation::Descend(clicked.clone()));
        } else {
            ctx.open(&clicked);
        }
    };

    let opened = item.clone();
    let handle_open = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        ctx.open(&opened);
    };

    let name_class = if is_dir {
        format!("{} {}", css::name, css::nameDir)
    } else {
        format!("{} {}", css::name, css::nameFile)
    };

    view! {
        <div
            class=css::listItem
            role="listitem"
            tabindex="0"
            aria-label=aria_label
            on:click=handle_click
        >
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
            <span class=name_class>{display_name}</span>
            {if is_dir {
                view! {
                    <span class=css::chevron aria-hidden="true">
                        <Icon icon=ic::CHEVRON_RIGHT />
                    </span>
                }
                .into_any()
            } else {
                view! {
                    <button class=css::openButton on:click=handle_open>
                        <Icon icon=ic::EXTERNAL_LINK />
                        <span>"Open"</span>
                    </button>
                }
                .into_any()
            }}
        </div>
    }
}
