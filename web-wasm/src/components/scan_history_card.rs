//! スキャン履歴カード

use agriscan_common::endpoints::FALLBACK_THUMBNAIL_URL;
use agriscan_common::ScanCard;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

#[component]
pub fn ScanHistoryCard<F>(card: ScanCard, view_label: String, on_open: F) -> impl IntoView
where
    F: Fn() + 'static + Send,
{
    let health_class = if card.is_healthy {
        "health-badge healthy"
    } else {
        "health-badge attention"
    };
    let headline_class = format!("card-headline tone-{}", card.headline.tone());

    view! {
        <div class="scan-card" on:click=move |_| on_open()>
            <img
                class="scan-thumb"
                src=card.thumbnail_url.clone()
                alt="Scan"
                on:error=|ev| {
                    // 読み込めない画像は代替に差し替える
                    if let Some(img) = ev
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
                    {
                        img.set_src(FALLBACK_THUMBNAIL_URL);
                    }
                }
            />
            <div class="scan-body">
                <div class="scan-row">
                    <span class=headline_class>{card.headline.label()}</span>
                    <span class=health_class>{card.health_label()}</span>
                </div>
                <div class="scan-meta">
                    {card.short_date.clone().map(|d| view! { <span>"📅 "{d}</span> })}
                    {card.yield_tonnage.clone().map(|y| view! { <span>"🌾 "{y}" T/Ha"</span> })}
                    {card.humid.then(|| view! { <span class="humid">"💧"</span> })}
                </div>
                <span class="view-details">{view_label}" →"</span>
            </div>
        </div>
    }
}
