use super::heading;
use agriscan_common::{DashboardModel, DataMode, ScanCard, ScanSection, SessionState};
use std::fmt::Write;

pub fn render(state: &SessionState, model: &DashboardModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", state.t(model.greeting.key()), model.display_name);
    if model.mode == DataMode::Demo {
        let _ = writeln!(out, "  ({})", state.t("offlineMode"));
    }
    let _ = writeln!(
        out,
        "🌤  {}  {}  {}",
        model.weather.temp_label(),
        model.weather.condition.as_deref().unwrap_or("--"),
        model.weather.humidity_label()
    );
    let _ = writeln!(out, "📍 {}\n", model.weather.location);

    let stats = &model.quick_stats;
    let _ = writeln!(out, "  {:<16} {}", state.t("projectedYield"), stats.projected_yield);
    let _ = writeln!(out, "  {:<16} {}", state.t("activeAlerts"), stats.active_alerts);
    let _ = writeln!(out, "  {:<16} {}\n", state.t("nextSpray"), stats.next_spray);

    let _ = writeln!(out, "{}", heading(state.t("recentScans")));
    match &model.scans {
        ScanSection::Loading => {
            let _ = writeln!(out, "  ...");
        }
        ScanSection::Empty => {
            let _ = writeln!(out, "  {}", state.t("noScans"));
        }
        ScanSection::Cards(cards) => {
            for (index, card) in cards.iter().enumerate() {
                let _ = writeln!(out, "{}", card_line(index, card));
            }
        }
    }

    out
}

/// スキャン履歴カード1行
pub fn card_line(index: usize, card: &ScanCard) -> String {
    let id = card
        .id
        .as_ref()
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#?".to_string());
    let mut line = format!(
        "  [{}] {:<6} {} {:>4}  {}",
        index + 1,
        id,
        if card.is_healthy { "✔" } else { "⚠" },
        card.health_label(),
        card.headline.label()
    );
    if let Some(date) = &card.short_date {
        let _ = write!(line, "  {}", date);
    }
    if let Some(tonnage) = &card.yield_tonnage {
        let _ = write!(line, "  {} T/Ha", tonnage);
    }
    if card.humid {
        line.push_str("  💧");
    }
    line
}
