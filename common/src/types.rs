//! バックエンドとやり取りする型の定義
//!
//! - Stats: ダッシュボード統計 (`GET /dashboard/stats`)
//! - RawScan: スキャン一覧の1件 (`GET /scans`)
//! - UploadResult: アップロード直後の解析結果 (`POST /scan/upload`)
//! - ScanView: レポート画面が描画する正規化済みの形

use crate::task::{deserialize_action_plan, Task};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// スキャン識別子
///
/// 一覧はDBの整数ID、アップロード応答は短い文字列IDを返すので両方を受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScanId(pub String);

impl ScanId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScanId {
    fn from(value: &str) -> Self {
        ScanId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ScanId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(ScanId(text)),
            RawId::Integer(n) => Ok(ScanId(n.to_string())),
        }
    }
}

/// 天気スナップショット
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    #[serde(alias = "temperature")]
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub condition: Option<String>,
    pub location: Option<String>,
}

/// ダッシュボード統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub projected_yield: String,
    pub active_alerts: u32,
    #[serde(default)]
    pub total_scans: Option<u32>,
    #[serde(default)]
    pub weather: Weather,
}

/// 一覧のスキャンに紐づく解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanResultRecord {
    pub health_score: Option<f64>,
    pub yield_prediction: Option<String>,
    pub pest_detected_count: Option<u32>,
    pub weather_temp: Option<f64>,
    pub weather_humidity: Option<f64>,
    pub weather_desc: Option<String>,
    pub n_level: Option<String>,
    pub p_level: Option<String>,
    pub k_level: Option<String>,
    /// アップロード時の解析結果そのもの（形は保証されない）
    pub raw_json_output: Option<Value>,
}

/// スキャン一覧の1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScan {
    pub id: Option<ScanId>,
    pub timestamp: Option<String>,
    pub image_path: Option<String>,
    pub user_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub result: Option<ScanResultRecord>,
}

/// 害虫検出（座標はすべて画像に対する%）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PestDetection {
    pub id: Option<u32>,
    pub label: String,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: Vec<f64>,
    pub severity: Option<String>,
}

/// 収量予測
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldForecast {
    pub value: Option<String>,
    pub trend: Option<String>,
    pub confidence: Option<f64>,
}

/// アップロード直後の解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResult {
    pub scan_id: Option<ScanId>,
    pub user_name: Option<String>,
    pub timestamp: Option<String>,
    pub health_score: Option<f64>,
    pub pest_detections: Vec<PestDetection>,
    pub pest_count: Option<u32>,
    pub n_level: Option<String>,
    pub p_level: Option<String>,
    pub k_level: Option<String>,
    pub weather_temp: Option<f64>,
    pub weather_humidity: Option<f64>,
    pub weather_desc: Option<String>,
    pub yield_forecast: Option<YieldForecast>,
    #[serde(deserialize_with = "deserialize_action_plan")]
    pub action_plan: Vec<Task>,
    pub alerts: Vec<String>,
    pub db_id: Option<i64>,
    /// 未知のキー（バックエンドが追加したフィールド）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// マップレイヤー画像
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayers {
    pub rgb_url: Option<String>,
    pub ndvi_url: Option<String>,
    pub pest_map_url: Option<String>,
}

/// 圃場の状態タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Healthy,
    Warning,
    Critical,
}

impl ScanStatus {
    /// 害虫が1件でも検出されていれば critical
    pub fn from_detections(detections: &[PestDetection]) -> Self {
        if detections.is_empty() {
            ScanStatus::Healthy
        } else {
            ScanStatus::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Healthy => "healthy",
            ScanStatus::Warning => "warning",
            ScanStatus::Critical => "critical",
        }
    }
}

/// レポート画面用に正規化されたスキャン
///
/// 構築後は変更しない。選択中スキャンを差し替えるときは丸ごと置き換える。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanView {
    pub id: ScanId,

    #[serde(rename = "fieldName")]
    pub field_name: String,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(rename = "healthScore", default)]
    pub health_score: f64,

    #[serde(default)]
    pub status: Option<ScanStatus>,

    #[serde(default)]
    pub yield_forecast: YieldForecast,

    #[serde(default)]
    pub n_level: Option<String>,

    #[serde(default)]
    pub p_level: Option<String>,

    #[serde(default)]
    pub k_level: Option<String>,

    #[serde(default)]
    pub weather_temp: Option<f64>,

    #[serde(default)]
    pub weather_humidity: Option<f64>,

    #[serde(default)]
    pub weather_desc: Option<String>,

    #[serde(default)]
    pub pest_count: Option<u32>,

    #[serde(default)]
    pub pest_detections: Vec<PestDetection>,

    #[serde(default, deserialize_with = "deserialize_action_plan")]
    pub action_plan: Vec<Task>,

    /// 型に現れないキー（生ペイロードから来たもの）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScanView {
    /// 識別子と表示名だけを持つ空のビュー
    pub fn new(id: ScanId, field_name: impl Into<String>) -> Self {
        Self {
            id,
            field_name: field_name.into(),
            user_name: None,
            timestamp: None,
            health_score: 0.0,
            status: None,
            yield_forecast: YieldForecast::default(),
            n_level: None,
            p_level: None,
            k_level: None,
            weather_temp: None,
            weather_humidity: None,
            weather_desc: None,
            pest_count: None,
            pest_detections: Vec::new(),
            action_plan: Vec::new(),
            extra: Map::new(),
        }
    }
}
