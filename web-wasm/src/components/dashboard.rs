//! ダッシュボード
//!
//! 挨拶・天気・クイック統計・最近のスキャン。オフライン時はデモ値で埋める。

use super::scan_history_card::ScanHistoryCard;
use crate::api::ApiClient;
use crate::store::use_store;
use agriscan_common::{
    from_dashboard_scan, Action, DashboardModel, DataMode, RawScan, ScanList, ScanSection,
};
use leptos::prelude::*;

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = use_store();
    let origin = use_context::<ApiClient>()
        .unwrap_or_default()
        .backend_origin();

    let model = Memo::new(move |_| {
        let hour = js_sys::Date::new_0().get_hours();
        store.with(|s| DashboardModel::build(s, hour, &origin))
    });
    // カードと同じ順で元データを引けるようにしておく
    let raw_scans = Memo::new(move |_| {
        store.with(|s| match &s.recent_scans {
            ScanList::Loaded(list) => list.clone(),
            _ => Vec::new(),
        })
    });

    let open = move |raw: RawScan| match from_dashboard_scan(&raw) {
        Ok(view) => store.dispatch(Action::OpenScan(view)),
        Err(e) => gloo::console::error!(format!("スキャンを開けません: {}", e)),
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div>
                    <p class="greeting">{move || store.t(model.get().greeting.key())}</p>
                    <h2 class="farmer-name">{move || model.get().display_name}</h2>
                </div>
                <Show when=move || model.get().mode == DataMode::Demo>
                    <span class="offline-badge">{move || store.t("offlineMode")}</span>
                </Show>
            </header>

            <section class="weather-card">
                {move || {
                    let weather = model.get().weather;
                    view! {
                        <div class="weather-main">
                            <span class="temp">{weather.temp_label()}</span>
                            <span class="condition">{weather.condition.clone().unwrap_or_default()}</span>
                        </div>
                        <div class="weather-meta">
                            <span>"📍 "{weather.location.clone()}</span>
                            <span>{weather.humidity_label()}</span>
                        </div>
                    }
                }}
            </section>

            <section class="quick-stats">
                <div class="stat">
                    <span class="stat-label">{move || store.t("projectedYield")}</span>
                    <span class="stat-value">{move || model.get().quick_stats.projected_yield}</span>
                </div>
                <div class="stat alert">
                    <span class="stat-label">{move || store.t("activeAlerts")}</span>
                    <span class="stat-value">{move || model.get().quick_stats.active_alerts}</span>
                </div>
                <div class="stat">
                    <span class="stat-label">{move || store.t("nextSpray")}</span>
                    <span class="stat-value">{move || model.get().quick_stats.next_spray}</span>
                </div>
            </section>

            <section class="recent-scans">
                <div class="section-header">
                    <h3>{move || store.t("recentScans")}</h3>
                    <span class="view-all">{move || store.t("viewAll")}</span>
                </div>
                {move || match model.get().scans {
                    ScanSection::Loading => view! { <div class="spinner"></div> }.into_any(),
                    ScanSection::Empty => view! {
                        <p class="empty">{store.t("noScans")}</p>
                    }.into_any(),
                    ScanSection::Cards(cards) => {
                        let raw = raw_scans.get();
                        cards
                            .into_iter()
                            .zip(raw)
                            .map(|(card, raw)| {
                                view! {
                                    <ScanHistoryCard
                                        card=card
                                        view_label=store.t("viewDetails")
                                        on_open=move || open(raw.clone())
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
