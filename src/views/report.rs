use super::{gauge, heading};
use agriscan_common::report::priority_tone;
use agriscan_common::{ReportModel, SessionState};
use std::fmt::Write;

pub fn render(state: &SessionState, model: &ReportModel) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        heading(&format!("{} - {} ({})", state.t("reports"), model.title_name, model.date_label))
    );

    let weather = &model.weather;
    let _ = writeln!(
        out,
        "{} {}  {}  {}",
        if weather.is_raining { "🌧" } else { "☀" },
        weather.description,
        weather
            .temp
            .map(|t| format!("{:.0}°C", t))
            .unwrap_or_else(|| "--°C".to_string()),
        weather
            .humidity
            .map(|h| format!("{:.0}%", h))
            .unwrap_or_else(|| "--%".to_string()),
    );

    let _ = writeln!(out, "\n{}", state.t("healthAndYield"));
    let _ = writeln!(
        out,
        "  {:<14} {} {:.0}%",
        state.t("healthScore"),
        gauge(model.health_score, 20),
        model.health_score
    );
    let _ = writeln!(
        out,
        "  {:<14} {} {}",
        state.t("projectedYield"),
        model.yield_value.as_deref().unwrap_or("--"),
        model.yield_trend.as_deref().unwrap_or("")
    );
    if model.pest_count > 0 {
        let _ = writeln!(out, "  🐛 {} pests detected", model.pest_count);
    }

    let _ = writeln!(out, "\n{}", state.t("soilAnalysis"));
    for nutrient in &model.nutrients {
        let _ = writeln!(
            out,
            "  {:<15} {:<8} {}",
            nutrient.name,
            nutrient.level,
            gauge(nutrient.share(), 10)
        );
    }

    let _ = writeln!(out, "\n{}", state.t("recommendedActions"));
    if model.tasks.is_empty() {
        let _ = writeln!(out, "  --");
    }
    for task in &model.tasks {
        let mark = if task.is_completed() { "☑" } else { "☐" };
        let _ = writeln!(
            out,
            "  {} [{}:{}] {}  ({} / {})",
            mark,
            task.priority.as_str(),
            priority_tone(&task.priority),
            task.task,
            task.due_date,
            task.zone
        );
        if let Some(cost) = &task.estimated_cost {
            let _ = writeln!(out, "      {}", cost);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriscan_common::{Action, ScanId, ScanView, Task};

    #[test]
    fn test_report_render() {
        let mut scan = ScanView::new(ScanId::from("c0ffee"), "New Drone Scan");
        scan.health_score = 80.0;
        scan.weather_desc = Some("Heavy Rain".into());
        scan.n_level = Some("Low".into());
        scan.action_plan = vec![Task::from_legacy(0, "Apply urea")];

        let mut state = SessionState::onboarded("en", "Asha");
        state.dispatch(Action::OpenScan(scan));
        let text = render(&state, &ReportModel::build(&state));

        assert!(text.contains("Asha"));
        assert!(text.contains("🌧 Heavy Rain"));
        assert!(text.contains("80%"));
        assert!(text.contains("Nitrogen (N)    Low"));
        assert!(text.contains("[High:orange] Apply urea"));
        assert!(text.contains("ASAP / General"));
    }

    #[test]
    fn test_empty_report() {
        let state = SessionState::onboarded("en", "");
        let text = render(&state, &ReportModel::build(&state));
        assert!(text.contains("Farmer"));
        assert!(text.contains("Today"));
        assert!(text.contains("☀ Clear"));
    }
}
