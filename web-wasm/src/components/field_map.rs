//! 圃場マップ（RGB / NDVI / 害虫レイヤー）

use crate::api::ApiClient;
use crate::store::{use_store, Store};
use agriscan_common::demo::NDVI_AVERAGE;
use agriscan_common::field_map::zone_position;
use agriscan_common::{Action, FieldMapModel, Overlay, RequestKind, RequestToken};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn FieldMap() -> impl IntoView {
    let store = use_store();
    let client = use_context::<ApiClient>().unwrap_or_default();

    let model = Memo::new(move |_| store.with(FieldMapModel::build));

    watch_map_layers(store, move |scan_id, token| {
        let client = client.clone();
        spawn_local(async move {
            let layers = client.get_map_layers(&scan_id).await;
            store.dispatch(Action::MapLayersResolved { token, layers });
        });
    });

    view! {
        <div class="field-map">
            <header class="map-header">
                <h2>{move || store.t("map")}</h2>
                <p class="field-name">{move || model.get().field_name}</p>
            </header>

            <div class="layer-tabs">
                {move || {
                    model
                        .get()
                        .tabs
                        .into_iter()
                        .map(|tab| {
                            let class = if tab.active { "layer-tab active" } else { "layer-tab" };
                            let layer = tab.layer;
                            view! {
                                <button
                                    class=class
                                    on:click=move |_| store.dispatch(Action::SetMapLayer(layer))
                                >
                                    {tab.name}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <div class="map-canvas">
                {move || {
                    model.get().image_url.map(|url| {
                        view! { <img class="map-image" src=url alt="Field layer" /> }
                    })
                }}
                {move || match model.get().overlay {
                    Overlay::Plain => ().into_any(),
                    Overlay::Ndvi(zones) => view! {
                        <div class="ndvi-overlay">
                            {zones
                                .iter()
                                .enumerate()
                                .map(|(i, zone)| {
                                    let (left, top) = zone_position(i);
                                    let style = format!(
                                        "left: {}%; top: {}%; background-color: {};",
                                        left, top, zone.color
                                    );
                                    view! {
                                        <div class="ndvi-zone" style=style>
                                            <span class="zone-name">{zone.name}</span>
                                            <span class="zone-ndvi">{format!("{:.2}", zone.ndvi)}</span>
                                            <span class="zone-health">{zone.health}</span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                            <div class="ndvi-average">{format!("Avg NDVI {:.2}", NDVI_AVERAGE)}</div>
                        </div>
                    }.into_any(),
                    Overlay::Pests(pests) => view! {
                        <div class="pest-overlay">
                            {pests
                                .iter()
                                .map(|pest| {
                                    let style = format!(
                                        "left: {}%; top: {}%;",
                                        pest.position.0, pest.position.1
                                    );
                                    view! {
                                        <div class="pest-marker" style=style title=pest.recommendation>
                                            <span class="pest-icon">"🐛"</span>
                                            <span class="pest-kind">{pest.kind}</span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <ul class="pest-list">
                            {pests
                                .iter()
                                .map(|pest| {
                                    let severity = format!("severity {}", pest.severity.to_lowercase());
                                    view! {
                                        <li class="pest-item">
                                            <strong>{pest.kind}</strong>
                                            <span>{pest.location}</span>
                                            <span class=severity>{pest.severity}</span>
                                            <span>{format!("{:.0}%", pest.confidence * 100.0)}</span>
                                            <p>{pest.recommendation}</p>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}

/// 選択中スキャンのレイヤー取得を始める
///
/// 追跡するのは選択中スキャンのIDだけ。取得開始で状態が変わっても再実行しない。
pub(crate) fn watch_map_layers<F>(store: Store, fetch: F)
where
    F: Fn(String, RequestToken) + 'static,
{
    let selected_id = Memo::new(move |_| {
        store.with(|s| s.selected_scan.as_ref().map(|scan| scan.id.to_string()))
    });

    Effect::new(move |_| {
        let Some(scan_id) = selected_id.get() else {
            return;
        };
        if store.state.with_untracked(|s| s.map_layers.is_some()) {
            return;
        }
        if let Some(token) = store.begin(RequestKind::MapLayers) {
            fetch(scan_id, token);
        }
    });
}
