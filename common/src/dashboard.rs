//! ダッシュボードの表示モデル

use crate::adapter::ScanCard;
use crate::demo;
use crate::state::{DataMode, ScanList, SessionState};

/// 時間帯の挨拶
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Greeting::Morning
        } else if hour < 17 {
            Greeting::Afternoon
        } else {
            Greeting::Evening
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Greeting::Morning => "goodMorning",
            Greeting::Afternoon => "goodAfternoon",
            Greeting::Evening => "goodEvening",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub projected_yield: String,
    pub active_alerts: u32,
    pub next_spray: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub condition: Option<String>,
    pub location: String,
}

impl WeatherSummary {
    pub fn temp_label(&self) -> String {
        match self.temp {
            Some(t) => format!("{:.0}°C", t),
            None => "--°C".to_string(),
        }
    }

    pub fn humidity_label(&self) -> String {
        match self.humidity {
            Some(h) => format!("Humidity: {:.0}%", h),
            None => "Humidity: --".to_string(),
        }
    }
}

/// 最近のスキャン欄
#[derive(Debug, Clone, PartialEq)]
pub enum ScanSection {
    Loading,
    Empty,
    Cards(Vec<ScanCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    pub mode: DataMode,
    pub greeting: Greeting,
    pub display_name: String,
    pub quick_stats: QuickStats,
    pub weather: WeatherSummary,
    pub scans: ScanSection,
}

impl DashboardModel {
    /// `hour` は端末のローカル時刻（0-23）
    pub fn build(state: &SessionState, hour: u32, backend_origin: &str) -> Self {
        let mode = state.data_mode();

        let (quick_stats, weather) = match (&state.api_stats, mode) {
            (Some(stats), DataMode::Live) => (
                QuickStats {
                    projected_yield: stats.projected_yield.clone(),
                    active_alerts: stats.active_alerts,
                    next_spray: demo::DEMO_NEXT_SPRAY.to_string(),
                },
                stats.weather.clone(),
            ),
            _ => (
                QuickStats {
                    projected_yield: demo::DEMO_PROJECTED_YIELD.to_string(),
                    active_alerts: demo::DEMO_ACTIVE_ALERTS,
                    next_spray: demo::DEMO_NEXT_SPRAY.to_string(),
                },
                demo::demo_weather(),
            ),
        };

        let display_name = if state.user_name.trim().is_empty() {
            demo::DEMO_FARMER_NAME.to_string()
        } else {
            state.user_name.clone()
        };

        let scans = match &state.recent_scans {
            ScanList::Loading => ScanSection::Loading,
            ScanList::NotRequested => ScanSection::Empty,
            ScanList::Loaded(list) if list.is_empty() => ScanSection::Empty,
            ScanList::Loaded(list) => ScanSection::Cards(
                list.iter()
                    .map(|scan| ScanCard::from_raw(scan, backend_origin))
                    .collect(),
            ),
        };

        Self {
            mode,
            greeting: Greeting::for_hour(hour),
            display_name,
            quick_stats,
            weather: WeatherSummary {
                temp: weather.temp,
                humidity: weather.humidity,
                condition: weather.condition,
                location: weather
                    .location
                    .unwrap_or_else(|| demo::DEMO_LOCATION.to_string()),
            },
            scans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, RequestKind};
    use crate::types::{RawScan, ScanId, Stats, Weather};

    const ORIGIN: &str = "http://localhost:8000";

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(16), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Evening);
        assert_eq!(Greeting::for_hour(23), Greeting::Evening);
    }

    #[test]
    fn test_offline_uses_demo_stats() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::Stats).expect("開始できない");
        state.dispatch(Action::StatsResolved { token, stats: None });

        let model = DashboardModel::build(&state, 9, ORIGIN);
        assert_eq!(model.mode, DataMode::Demo);
        assert_eq!(model.quick_stats.projected_yield, "+15%");
        assert_eq!(model.quick_stats.active_alerts, 3);
        assert_eq!(model.weather.location, "Bhubaneswar, Odisha");
        assert_eq!(model.display_name, "Rajesh Kumar");
        assert_eq!(model.scans, ScanSection::Empty);
    }

    #[test]
    fn test_live_stats() {
        let mut state = SessionState::onboarded("en", "Asha");
        let token = state.begin(RequestKind::Stats).expect("開始できない");
        state.dispatch(Action::StatsResolved {
            token,
            stats: Some(Stats {
                projected_yield: "4.2 T/Ha".to_string(),
                active_alerts: 2,
                total_scans: Some(24),
                weather: Weather {
                    temp: Some(28.0),
                    humidity: Some(65.0),
                    condition: Some("Sunny".to_string()),
                    location: None,
                },
            }),
        });

        let model = DashboardModel::build(&state, 14, ORIGIN);
        assert_eq!(model.mode, DataMode::Live);
        assert_eq!(model.greeting, Greeting::Afternoon);
        assert_eq!(model.display_name, "Asha");
        assert_eq!(model.quick_stats.projected_yield, "4.2 T/Ha");
        assert_eq!(model.quick_stats.next_spray, "Tomorrow");
        assert_eq!(model.weather.location, "Odisha, India");
        assert_eq!(model.weather.temp_label(), "28°C");
        assert_eq!(model.weather.humidity_label(), "Humidity: 65%");
    }

    #[test]
    fn test_scan_section_states() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::RecentScans).expect("開始できない");
        assert_eq!(DashboardModel::build(&state, 9, ORIGIN).scans, ScanSection::Loading);

        state.dispatch(Action::ScansResolved {
            token,
            scans: Some(vec![RawScan {
                id: Some(ScanId::from("1")),
                ..Default::default()
            }]),
        });
        match DashboardModel::build(&state, 9, ORIGIN).scans {
            ScanSection::Cards(cards) => assert_eq!(cards.len(), 1),
            other => panic!("カードが無い: {:?}", other),
        }
    }

    #[test]
    fn test_weather_labels_without_values() {
        let summary = WeatherSummary {
            temp: None,
            humidity: None,
            condition: None,
            location: String::new(),
        };
        assert_eq!(summary.temp_label(), "--°C");
        assert_eq!(summary.humidity_label(), "Humidity: --");
    }
}
