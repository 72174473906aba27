//! オフライン（デモ）モードの内蔵データ
//!
//! バックエンドに繋がらないときダッシュボードとマップはこの値で描画する。

use crate::types::Weather;

pub const DEMO_FARMER_NAME: &str = "Rajesh Kumar";
pub const DEMO_FIELD_NAME: &str = "Field A - North Section";
pub const DEMO_LOCATION: &str = "Odisha, India";

pub const DEMO_PROJECTED_YIELD: &str = "+15%";
pub const DEMO_ACTIVE_ALERTS: u32 = 3;
pub const DEMO_NEXT_SPRAY: &str = "Tomorrow";

pub fn demo_weather() -> Weather {
    Weather {
        temp: Some(28.0),
        humidity: Some(65.0),
        condition: Some("Partly Cloudy".to_string()),
        location: Some("Bhubaneswar, Odisha".to_string()),
    }
}

/// NDVIゾーン
#[derive(Debug, Clone, PartialEq)]
pub struct NdviZone {
    pub id: u32,
    pub name: &'static str,
    pub ndvi: f64,
    pub health: &'static str,
    pub color: &'static str,
}

pub static NDVI_ZONES: [NdviZone; 5] = [
    NdviZone { id: 1, name: "Zone A", ndvi: 0.85, health: "Excellent", color: "#10B981" },
    NdviZone { id: 2, name: "Zone B", ndvi: 0.72, health: "Good", color: "#84CC16" },
    NdviZone { id: 3, name: "Zone C", ndvi: 0.58, health: "Moderate", color: "#FCD34D" },
    NdviZone { id: 4, name: "Zone D", ndvi: 0.45, health: "Poor", color: "#FB923C" },
    NdviZone { id: 5, name: "Zone E", ndvi: 0.32, health: "Critical", color: "#EF4444" },
];

pub const NDVI_AVERAGE: f64 = 0.58;

/// マップ上の害虫マーカー
#[derive(Debug, Clone, PartialEq)]
pub struct PestMarker {
    pub id: u32,
    pub kind: &'static str,
    pub location: &'static str,
    /// 画像に対する% (x, y)
    pub position: (f64, f64),
    pub severity: &'static str,
    pub confidence: f64,
    pub recommendation: &'static str,
}

pub static PEST_MARKERS: [PestMarker; 3] = [
    PestMarker {
        id: 1,
        kind: "Stem Borer",
        location: "Zone A",
        position: (35.0, 45.0),
        severity: "High",
        confidence: 0.94,
        recommendation: "Apply Chlorpyrifos 20 EC @ 2ml/liter immediately",
    },
    PestMarker {
        id: 2,
        kind: "Locust",
        location: "Zone C",
        position: (65.0, 30.0),
        severity: "Critical",
        confidence: 0.98,
        recommendation: "Emergency spray with Malathion 50 EC @ 2ml/liter",
    },
    PestMarker {
        id: 3,
        kind: "Aphids",
        location: "Zone B",
        position: (50.0, 70.0),
        severity: "Medium",
        confidence: 0.87,
        recommendation: "Use Imidacloprid 17.8 SL @ 0.5ml/liter",
    },
];
