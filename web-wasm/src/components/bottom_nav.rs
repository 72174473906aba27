//! 下部ナビゲーション

use crate::store::use_store;
use agriscan_common::{Action, View};
use leptos::prelude::*;

fn icon(view: View) -> &'static str {
    match view {
        View::Dashboard => "🏠",
        View::Map => "🗺",
        View::Report => "📊",
        View::Settings => "⚙",
    }
}

#[component]
pub fn BottomNav() -> impl IntoView {
    let store = use_store();
    let current = Memo::new(move |_| store.with(|s| s.current_view));

    view! {
        <nav class="bottom-nav">
            {View::ALL
                .into_iter()
                .map(|item| {
                    let class = move || {
                        if current.get() == item { "nav-item active" } else { "nav-item" }
                    };
                    view! {
                        <button
                            class=class
                            on:click=move |_| store.dispatch(Action::SetCurrentView(item))
                        >
                            <span class="nav-icon">{icon(item)}</span>
                            <span class="nav-label">{move || store.t(item.label_key())}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
