//! 解析レポートの表示モデル

use crate::adapter::short_date;
use crate::state::SessionState;
use crate::task::{Priority, Task};

/// 半径40のドーナツ円周
pub const DONUT_CIRCUMFERENCE: f64 = 251.2;

const DEFAULT_LEVEL: &str = "Optimal";
const DEFAULT_WEATHER: &str = "Clear";
const DEFAULT_NAME: &str = "Farmer";

#[derive(Debug, Clone, PartialEq)]
pub struct Nutrient {
    pub name: &'static str,
    pub level: String,
    pub color: &'static str,
}

impl Nutrient {
    /// ドーナツ上の割合（%）
    pub fn share(&self) -> f64 {
        nutrient_share(&self.level)
    }
}

/// レベル表記をドーナツの割合に写す
pub fn nutrient_share(level: &str) -> f64 {
    match level {
        "Optimal" => 33.0,
        "Low" => 15.0,
        "High" => 45.0,
        _ => 33.0,
    }
}

/// SVGの stroke-dasharray / stroke-dashoffset
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub color: &'static str,
    pub dash: f64,
    pub gap: f64,
    pub offset: f64,
}

pub fn donut_segments(nutrients: &[Nutrient]) -> Vec<DonutSegment> {
    let mut cumulative = 0.0;
    nutrients
        .iter()
        .map(|n| {
            let share = n.share();
            let dash = share / 100.0 * DONUT_CIRCUMFERENCE;
            let offset = -(cumulative / 100.0 * DONUT_CIRCUMFERENCE);
            cumulative += share;
            DonutSegment {
                color: n.color,
                dash,
                gap: DONUT_CIRCUMFERENCE - dash,
                offset,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportWeather {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub description: String,
    pub is_raining: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportModel {
    pub has_scan: bool,
    pub title_name: String,
    pub date_label: String,
    pub weather: ReportWeather,
    pub nutrients: Vec<Nutrient>,
    pub health_score: f64,
    pub yield_value: Option<String>,
    pub yield_trend: Option<String>,
    pub pest_count: u32,
    pub tasks: Vec<Task>,
}

impl ReportModel {
    /// 選択中スキャンが無くても既定値で描画できる
    pub fn build(state: &SessionState) -> Self {
        let scan = state.selected_scan.as_ref();

        let level = |value: Option<&String>| {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
        };

        let description = scan
            .and_then(|s| s.weather_desc.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_WEATHER.to_string());

        let title_name = scan
            .and_then(|s| s.user_name.clone())
            .filter(|n| !n.trim().is_empty())
            .or_else(|| Some(state.user_name.clone()).filter(|n| !n.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        Self {
            has_scan: scan.is_some(),
            title_name,
            date_label: scan
                .and_then(|s| s.timestamp.as_deref())
                .and_then(short_date)
                .unwrap_or_else(|| "Today".to_string()),
            weather: ReportWeather {
                temp: scan.and_then(|s| s.weather_temp),
                humidity: scan.and_then(|s| s.weather_humidity),
                is_raining: is_raining(&description),
                description,
            },
            nutrients: vec![
                Nutrient {
                    name: "Nitrogen (N)",
                    level: level(scan.and_then(|s| s.n_level.as_ref())),
                    color: "#3B82F6",
                },
                Nutrient {
                    name: "Phosphorus (P)",
                    level: level(scan.and_then(|s| s.p_level.as_ref())),
                    color: "#8B5CF6",
                },
                Nutrient {
                    name: "Potassium (K)",
                    level: level(scan.and_then(|s| s.k_level.as_ref())),
                    color: "#EC4899",
                },
            ],
            health_score: scan.map(|s| s.health_score).unwrap_or(0.0),
            yield_value: scan.and_then(|s| s.yield_forecast.value.clone()),
            yield_trend: scan.and_then(|s| s.yield_forecast.trend.clone()),
            pest_count: scan
                .map(|s| s.pest_count.unwrap_or(s.pest_detections.len() as u32))
                .unwrap_or(0),
            tasks: scan.map(|s| s.action_plan.clone()).unwrap_or_default(),
        }
    }

    pub fn segments(&self) -> Vec<DonutSegment> {
        donut_segments(&self.nutrients)
    }
}

pub fn is_raining(description: &str) -> bool {
    let lower = description.to_lowercase();
    lower.contains("rain") || lower.contains("drizzle")
}

/// 優先度の表示色キー
pub fn priority_tone(priority: &Priority) -> &'static str {
    match priority {
        Priority::Critical => "red",
        Priority::High => "orange",
        Priority::Medium => "yellow",
        Priority::Low => "blue",
        Priority::Other(_) => "gray",
    }
}
