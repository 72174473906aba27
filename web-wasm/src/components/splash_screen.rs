//! スプラッシュ・言語選択・名前入力

use crate::store::use_store;
use agriscan_common::{Action, SplashStep, SUPPORTED_LANGUAGES};
use leptos::prelude::*;

#[component]
pub fn SplashScreen() -> impl IntoView {
    let store = use_store();
    let step = Memo::new(move |_| store.with(|s| s.splash));
    let (name, set_name) = signal(String::new());

    let submit = move || store.dispatch(Action::SubmitName(name.get_untracked()));

    view! {
        <div class="splash">
            <div class="splash-logo">"🌾"</div>
            <h1>{move || store.t("appName")}</h1>
            <p class="tagline">{move || store.t("tagline")}</p>

            {move || match step.get() {
                SplashStep::Splash | SplashStep::Done => view! {
                    <div class="splash-loader"></div>
                }.into_any(),
                SplashStep::Language => view! {
                    <div class="splash-languages">
                        {SUPPORTED_LANGUAGES
                            .iter()
                            .map(|language| {
                                let code = language.code;
                                view! {
                                    <button
                                        class="language-button"
                                        on:click=move |_| store.dispatch(Action::ChooseLanguage(code.to_string()))
                                    >
                                        <span class="native">{language.native}</span>
                                        <span class="name">{language.name}</span>
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }.into_any(),
                SplashStep::Name => view! {
                    <form
                        class="splash-name"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <label for="user-name">{move || store.t("profile")}</label>
                        <input
                            id="user-name"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                        <button
                            type="submit"
                            disabled=move || name.get().trim().is_empty()
                        >
                            "→"
                        </button>
                    </form>
                }.into_any(),
            }}
        </div>
    }
}
