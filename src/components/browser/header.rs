//! Browser header: breadcrumb, Back, and the audio folder field.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::BrowserContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::core::Navigation;

stylance::import_crate_style!(css, "src/components/browser/browser.module.css");

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let breadcrumb = Memo::new(move |_| {
        ctx.browser
            .with(|b| b.navigation().breadcrumb.clone())
    });
    let can_go_back = Memo::new(move |_| ctx.browser.with(|b| b.can_go_back()));
    let at_root = Memo::new(move |_| ctx.browser.with(|b| !b.navigation().can_go_back()));

    view! {
        <header class=css::header>
            <div class=css::location>
                <span class=css::locationIcon>
                    {move || {
                        let icon = if at_root.get() { ic::HOME } else { ic::FOLDER };
                        view! { <Icon icon=icon /> }
                    }}
                </span>
                <span class=css::breadcrumb>
                    {move || {
                        let label = breadcrumb.get();
                        if label.is_empty() { APP_NAME.to_string() } else { label }
                    }}
                </span>
            </div>

            <Show when=move || can_go_back.get()>
                <button
                    class=css::backButton
                    aria-label="Back"
                    on:click=move |_| ctx.navigate(Navigation::Ascend)
                >
                    <Icon icon=ic::CHEVRON_LEFT />
                    <span>"Back"</span>
                </button>
            </Show>

            <label class=css::audioBase>
                <span class=css::audioBaseIcon aria-hidden="true"><Icon icon=ic::AUDIO /></span>
                <input
                    type="text"
                    aria-label="Audio folder"
                    prop:value=move || ctx.audio_base.get()
                    on:input=move |ev| ctx.audio_base.set(event_target_value(&ev))
                />
            </label>
        </header>
    }
}
