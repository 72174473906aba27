//! 設定（言語・プロフィール）

use crate::store::use_store;
use agriscan_common::{Action, SUPPORTED_LANGUAGES};
use leptos::prelude::*;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[component]
pub fn Settings() -> impl IntoView {
    let store = use_store();
    let language = Memo::new(move |_| store.with(|s| s.language.clone()));
    let user_name = Memo::new(move |_| store.with(|s| s.user_name.clone()));

    view! {
        <div class="settings">
            <h2>{move || store.t("settings")}</h2>

            <section class="settings-section">
                <h3>{move || store.t("language")}</h3>
                <div class="language-list">
                    {SUPPORTED_LANGUAGES
                        .iter()
                        .map(|lang| {
                            let code = lang.code;
                            let class = move || {
                                if language.get() == code {
                                    "language-option selected"
                                } else {
                                    "language-option"
                                }
                            };
                            view! {
                                <button
                                    class=class
                                    on:click=move |_| store.dispatch(Action::SetLanguage(code.to_string()))
                                >
                                    <span class="native">{lang.native}</span>
                                    <span class="name">{lang.name}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="settings-section">
                <h3>{move || store.t("profile")}</h3>
                <input
                    type="text"
                    class="name-input"
                    prop:value=move || user_name.get()
                    on:change=move |ev| store.dispatch(Action::SetUserName(event_target_value(&ev)))
                />
            </section>

            <p class="app-version">{format!("v{}", APP_VERSION)}</p>
        </div>
    }
}
