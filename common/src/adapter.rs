//! スキャンアダプタ
//!
//! 形の違う3種類のスキャンデータをレポート画面用の ScanView に揃える:
//! - ダッシュボード一覧の RawScan（`result.*` が欠けていてもよい）
//! - アップロード直後の UploadResult
//! - その中に埋め込まれた生JSON (`raw_json_output`)
//!
//! 識別子が無い入力だけはエラーにする。解析値はすべて省略可能。

use crate::endpoints::thumbnail_url;
use crate::error::{Error, Result};
use crate::task::{deserialize_action_plan, Task};
use crate::types::{RawScan, ScanId, ScanStatus, ScanView, UploadResult, YieldForecast};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};

/// アップロード直後のスキャンの表示名
pub const UPLOAD_FIELD_NAME: &str = "New Drone Scan";

/// 一覧から開いたスキャンの収量トレンド
pub const CALCULATED_TREND: &str = "Calculated";

/// この値を超えると健全とみなす
pub const HEALTHY_THRESHOLD: f64 = 70.0;

/// ダッシュボード一覧の1件から ScanView を作る
///
/// `raw_json_output` がオブジェクトなら最後に上から重ねる（後勝ち）。
pub fn from_dashboard_scan(scan: &RawScan) -> Result<ScanView> {
    let id = scan.id.clone().ok_or(Error::MissingScanId)?;
    let result = scan.result.clone().unwrap_or_default();

    let mut view = ScanView::new(id.clone(), format!("Scan #{}", id));
    view.user_name = scan.user_name.clone();
    view.timestamp = scan.timestamp.clone();
    view.health_score = result.health_score.unwrap_or(0.0);
    view.yield_forecast = YieldForecast {
        value: result.yield_prediction.clone(),
        trend: Some(CALCULATED_TREND.to_string()),
        confidence: None,
    };
    view.n_level = result.n_level.clone();
    view.p_level = result.p_level.clone();
    view.k_level = result.k_level.clone();
    view.weather_temp = result.weather_temp;
    view.weather_humidity = result.weather_humidity;
    view.weather_desc = result.weather_desc.clone();
    view.pest_count = result.pest_detected_count;

    let raw = result.raw_json_output.as_ref().and_then(Value::as_object);
    if let Some(raw) = raw {
        view.action_plan = action_plan_of(raw);
        return Ok(overlay_fields(view, raw));
    }

    Ok(view)
}

/// アップロード応答から ScanView を作る
///
/// `received_at` は応答にタイムスタンプが無いときに使う受信時刻。
pub fn from_upload(result: UploadResult, received_at: &str) -> Result<ScanView> {
    let id = result.scan_id.clone().ok_or(Error::MissingScanId)?;

    let mut view = ScanView::new(id, UPLOAD_FIELD_NAME);
    view.timestamp = result
        .timestamp
        .clone()
        .or_else(|| Some(received_at.to_string()));
    view.health_score = result.health_score.unwrap_or(0.0);
    view.status = Some(ScanStatus::from_detections(&result.pest_detections));
    view.user_name = result.user_name;
    view.yield_forecast = result.yield_forecast.unwrap_or_default();
    view.n_level = result.n_level;
    view.p_level = result.p_level;
    view.k_level = result.k_level;
    view.weather_temp = result.weather_temp;
    view.weather_humidity = result.weather_humidity;
    view.weather_desc = result.weather_desc;
    view.pest_count = result.pest_count;
    view.pest_detections = result.pest_detections;
    view.action_plan = result.action_plan;

    // 型に載らない残りのキーも全部持たせる
    let mut extra = result.extra;
    if !result.alerts.is_empty() {
        extra.insert("alerts".into(), Value::from(result.alerts));
    }
    if let Some(db_id) = result.db_id {
        extra.insert("db_id".into(), Value::from(db_id));
    }

    if extra.is_empty() {
        Ok(view)
    } else {
        Ok(overlay_fields(view, &extra))
    }
}

fn action_plan_of(raw: &Map<String, Value>) -> Vec<Task> {
    #[derive(Deserialize)]
    struct PlanOnly {
        #[serde(default, deserialize_with = "deserialize_action_plan")]
        action_plan: Vec<Task>,
    }

    raw.get("action_plan")
        .cloned()
        .map(|plan| {
            let mut holder = Map::new();
            holder.insert("action_plan".into(), plan);
            serde_json::from_value::<PlanOnly>(Value::Object(holder))
                .map(|p| p.action_plan)
                .unwrap_or_default()
        })
        .unwrap_or_default()
}

/// base の上に overlay のキーを後勝ちで重ねる
///
/// `id` は上書きしない。重ねた結果が ScanView として読めなければ base を返す。
fn overlay_fields(base: ScanView, overlay: &Map<String, Value>) -> ScanView {
    let mut merged = match serde_json::to_value(&base) {
        Ok(Value::Object(map)) => map,
        _ => return base,
    };

    for (key, value) in overlay {
        if key == "id" {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or(base)
}

/// 一覧カードの見出し（優先度順に1つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardHeadline {
    PestsDetected(u32),
    NitrogenDeficiency,
    PotassiumLeaching,
    HighFungalRisk,
    Healthy,
}

impl CardHeadline {
    pub fn label(&self) -> String {
        match self {
            CardHeadline::PestsDetected(n) => format!("{} Pests Detected", n),
            CardHeadline::NitrogenDeficiency => "Nitrogen Deficiency".to_string(),
            CardHeadline::PotassiumLeaching => "Potassium Leaching".to_string(),
            CardHeadline::HighFungalRisk => "High Fungal Risk".to_string(),
            CardHeadline::Healthy => "Healthy Crop".to_string(),
        }
    }

    /// 表示色のキー（CSSクラス・端末色の選択に使う）
    pub fn tone(&self) -> &'static str {
        match self {
            CardHeadline::PestsDetected(_) => "red",
            CardHeadline::NitrogenDeficiency => "orange",
            CardHeadline::PotassiumLeaching => "yellow",
            CardHeadline::HighFungalRisk => "purple",
            CardHeadline::Healthy => "gray",
        }
    }
}

/// ダッシュボードのスキャン履歴カード
#[derive(Debug, Clone, PartialEq)]
pub struct ScanCard {
    pub id: Option<ScanId>,
    pub health_score: f64,
    pub is_healthy: bool,
    pub headline: CardHeadline,
    /// "Jan 24" 形式
    pub short_date: Option<String>,
    /// 収量予測の先頭トークン（例: "4.2"）
    pub yield_tonnage: Option<String>,
    /// 湿度80%超
    pub humid: bool,
    pub thumbnail_url: String,
}

impl ScanCard {
    pub fn from_raw(scan: &RawScan, backend_origin: &str) -> Self {
        let result = scan.result.clone().unwrap_or_default();
        let health = result.health_score.unwrap_or(0.0);
        let pests = result.pest_detected_count.unwrap_or(0);
        let humidity = result.weather_humidity.unwrap_or(0.0);
        let n_level = result.n_level.as_deref().unwrap_or("Optimal");
        let k_level = result.k_level.as_deref().unwrap_or("Optimal");

        let headline = if pests > 0 {
            CardHeadline::PestsDetected(pests)
        } else if n_level == "Low" {
            CardHeadline::NitrogenDeficiency
        } else if k_level == "Low" {
            CardHeadline::PotassiumLeaching
        } else if humidity > 85.0 {
            CardHeadline::HighFungalRisk
        } else {
            CardHeadline::Healthy
        };

        Self {
            id: scan.id.clone(),
            health_score: health,
            is_healthy: health > HEALTHY_THRESHOLD,
            headline,
            short_date: scan.timestamp.as_deref().and_then(short_date),
            yield_tonnage: result
                .yield_prediction
                .as_deref()
                .and_then(|y| y.split_whitespace().next())
                .map(str::to_string),
            humid: humidity > 80.0,
            thumbnail_url: thumbnail_url(backend_origin, scan.image_path.as_deref()),
        }
    }

    /// "85%" 形式
    pub fn health_label(&self) -> String {
        format!("{:.0}%", self.health_score)
    }
}

/// タイムスタンプを "Jan 24" 形式にする
///
/// RFC3339、タイムゾーン無しのISO形式、日付のみを受け付ける。
pub fn short_date(timestamp: &str) -> Option<String> {
    const FORMAT: &str = "%b %-d";

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.format(FORMAT).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.format(FORMAT).to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return Some(date.format(FORMAT).to_string());
    }
    None
}
