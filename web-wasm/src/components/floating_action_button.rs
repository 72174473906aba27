//! 新規スキャン用のフローティングボタン

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn FloatingActionButton<F>(uploading: Memo<bool>, on_file: F) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send,
{
    let input_ref = NodeRef::<html::Input>::new();

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
        // 同じファイルをもう一度選べるように
        input.set_value("");
    };

    view! {
        <input
            node_ref=input_ref
            type="file"
            accept="image/*"
            class="hidden-file-input"
            style="display: none;"
            on:change=on_change
        />
        <button
            class="fab"
            class:uploading=move || uploading.get()
            disabled=move || uploading.get()
            on:click=move |_| {
                if let Some(input) = input_ref.get() {
                    input.click();
                }
            }
        >
            {move || if uploading.get() { "…" } else { "+" }}
        </button>
    }
}
