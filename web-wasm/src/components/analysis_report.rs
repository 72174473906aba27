//! 診断レポート
//!
//! 天気・土壌の栄養バランス（ドーナツ）・健康度と収量・推奨作業。

use crate::store::use_store;
use agriscan_common::report::priority_tone;
use agriscan_common::{Action, ReportModel};
use leptos::prelude::*;

#[component]
pub fn AnalysisReport() -> impl IntoView {
    let store = use_store();
    let model = Memo::new(move |_| store.with(ReportModel::build));

    view! {
        <div class="analysis-report">
            <header class="report-header">
                <button class="back-button" on:click=move |_| store.dispatch(Action::Back)>"←"</button>
                <div>
                    <h2>{move || model.get().title_name}</h2>
                    <p class="report-date">{move || model.get().date_label}</p>
                </div>
            </header>

            {move || {
                let weather = model.get().weather;
                let icon = if weather.is_raining { "🌧" } else { "☀" };
                view! {
                    <section class="report-weather">
                        <span class="weather-icon">{icon}</span>
                        <span>{weather.temp.map(|t| format!("{:.0}°C", t)).unwrap_or_else(|| "--°C".to_string())}</span>
                        <span>{weather.humidity.map(|h| format!("{:.0}%", h)).unwrap_or_else(|| "--".to_string())}</span>
                        <span class="weather-desc">{weather.description}</span>
                    </section>
                }
            }}

            <section class="soil-analysis">
                <h3>{move || store.t("soilAnalysis")}</h3>
                <div class="donut-wrap">
                    <svg class="donut" viewBox="0 0 100 100">
                        <circle cx="50" cy="50" r="40" fill="none" stroke="#E5E7EB" stroke-width="12" />
                        {move || {
                            model
                                .get()
                                .segments()
                                .into_iter()
                                .map(|segment| {
                                    view! {
                                        <circle
                                            cx="50"
                                            cy="50"
                                            r="40"
                                            fill="none"
                                            stroke=segment.color
                                            stroke-width="12"
                                            stroke-dasharray=format!("{} {}", segment.dash, segment.gap)
                                            stroke-dashoffset=segment.offset.to_string()
                                            transform="rotate(-90 50 50)"
                                        />
                                    }
                                })
                                .collect_view()
                        }}
                    </svg>
                </div>
                <ul class="nutrient-legend">
                    {move || {
                        model
                            .get()
                            .nutrients
                            .into_iter()
                            .map(|nutrient| {
                                let swatch = format!("background-color: {};", nutrient.color);
                                view! {
                                    <li>
                                        <span class="swatch" style=swatch></span>
                                        <span class="nutrient-name">{nutrient.name}</span>
                                        <span class="nutrient-level">{nutrient.level}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>

            <section class="health-yield">
                <h3>{move || store.t("healthAndYield")}</h3>
                <div class="health-bar">
                    <div
                        class="health-fill"
                        style=move || format!("width: {}%;", model.get().health_score.clamp(0.0, 100.0))
                    ></div>
                </div>
                <p>
                    {move || store.t("healthScore")}": "
                    {move || format!("{:.0}%", model.get().health_score)}
                </p>
                <p class="yield">
                    {move || {
                        let m = model.get();
                        match (m.yield_value, m.yield_trend) {
                            (Some(value), Some(trend)) => format!("{} ({})", value, trend),
                            (Some(value), None) => value,
                            _ => "--".to_string(),
                        }
                    }}
                </p>
                <p class="pest-count">{move || format!("🐛 {}", model.get().pest_count)}</p>
            </section>

            <section class="recommended-actions">
                <h3>{move || store.t("recommendedActions")}</h3>
                <ul>
                    {move || {
                        model
                            .get()
                            .tasks
                            .into_iter()
                            .map(|task| {
                                let badge = format!("priority tone-{}", priority_tone(&task.priority));
                                let done = if task.is_completed() { "task done" } else { "task" };
                                view! {
                                    <li class=done>
                                        <span class=badge>{task.priority.as_str().to_string()}</span>
                                        <span class="task-text">{task.task.clone()}</span>
                                        <span class="task-meta">
                                            {format!("{} · {}", task.zone, task.due_date)}
                                        </span>
                                        {task.estimated_cost.clone().map(|cost| view! {
                                            <span class="task-cost">{cost}</span>
                                        })}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>
        </div>
    }
}
