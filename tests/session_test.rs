//! セッションテスト
//!
//! 疎通確認・一覧取得・アップロード・マップレイヤーが状態ストアへ正しく反映されるか

mod stub;

use agriscan::api::{ApiClient, ImageUpload};
use agriscan::error::AgriScanError;
use agriscan::session::Session;
use agriscan_common::{
    DashboardModel, DataMode, ScanList, ScanSection, SessionState, View,
};
use std::time::Duration;
use stub::{closed_base_url, Route, StubServer};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0];

const STATS_JSON: &str = r#"{"projected_yield": "4.2 T/Ha", "active_alerts": 2, "weather": {"temp": 30}}"#;

const SCANS_JSON: &str = r#"[
    {
        "id": 12,
        "timestamp": "2026-01-24T10:00:00",
        "image_path": "uploads/12.jpg",
        "user_name": "Rajesh",
        "result": {
            "health_score": 64,
            "n_level": "Low",
            "pest_detected_count": 0,
            "yield_prediction": "3.8 Tons/Ha",
            "raw_json_output": {
                "action_plan": ["Apply urea", {"task": "Scout zone C", "priority": "Medium"}],
                "weather_desc": "Light Rain"
            }
        }
    }
]"#;

fn session(base_url: &str) -> Session {
    let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();
    Session::new(client, SessionState::onboarded("en", "Asha"), 5)
}

fn jpeg() -> ImageUpload {
    ImageUpload::from_bytes("field.jpg", JPEG.to_vec()).unwrap()
}

#[tokio::test]
async fn test_connect_online_fetches_scans() {
    let server = StubServer::spawn(vec![
        Route::get("/dashboard/stats", 200, STATS_JSON),
        Route::get("/scans", 200, SCANS_JSON),
    ])
    .await;

    let mut session = session(&server.base_url);
    session.connect().await;

    let state = session.state();
    assert!(state.is_connected);
    assert_eq!(state.data_mode(), DataMode::Live);
    match &state.recent_scans {
        ScanList::Loaded(list) => assert_eq!(list.len(), 1),
        other => panic!("一覧が読み込まれていない: {:?}", other),
    }

    let model = DashboardModel::build(state, 9, &session.client().backend_origin());
    assert_eq!(model.quick_stats.projected_yield, "4.2 T/Ha");
    match model.scans {
        ScanSection::Cards(cards) => {
            assert_eq!(cards[0].headline.label(), "Nitrogen Deficiency");
            assert!(cards[0].thumbnail_url.ends_with("/uploads/12.jpg"));
        }
        other => panic!("カードが無い: {:?}", other),
    }
}

#[tokio::test]
async fn test_connect_offline_stays_in_demo_mode() {
    let mut session = session(&closed_base_url().await);
    session.connect().await;

    let state = session.state();
    assert!(!state.is_connected);
    assert!(state.api_stats.is_none());
    assert_eq!(state.recent_scans, ScanList::NotRequested);

    let model = DashboardModel::build(state, 9, "http://localhost:8000");
    assert_eq!(model.mode, DataMode::Demo);
    assert_eq!(model.quick_stats.projected_yield, "+15%");
    assert_eq!(model.scans, ScanSection::Empty);

    // 再試行しない
    session.connect().await;
    assert!(!session.state().is_connected);
}

#[tokio::test]
async fn test_stats_probe_runs_once() {
    let server = StubServer::spawn(vec![
        Route::get("/dashboard/stats", 200, STATS_JSON),
        Route::get("/scans", 200, "[]"),
    ])
    .await;

    let mut session = session(&server.base_url);
    session.connect().await;
    session.connect().await;

    let stats_calls = server
        .requests()
        .iter()
        .filter(|r| r.target.contains("dashboard/stats"))
        .count();
    assert_eq!(stats_calls, 1);
}

#[tokio::test]
async fn test_open_scan_merges_raw_payload() {
    let server = StubServer::spawn(vec![
        Route::get("/dashboard/stats", 200, STATS_JSON),
        Route::get("/scans", 200, SCANS_JSON),
    ])
    .await;

    let mut session = session(&server.base_url);
    session.connect().await;

    let raw = match &session.state().recent_scans {
        ScanList::Loaded(list) => list[0].clone(),
        _ => panic!("一覧が無い"),
    };
    session.open_scan(&raw).unwrap();

    let state = session.state();
    assert_eq!(state.current_view, View::Report);
    let scan = state.selected_scan.as_ref().unwrap();
    assert_eq!(scan.field_name, "Scan #12");
    assert_eq!(scan.health_score, 64.0);
    assert_eq!(scan.weather_desc.as_deref(), Some("Light Rain"));
    assert_eq!(scan.action_plan.len(), 2);
    assert_eq!(scan.action_plan[0].due_date, "ASAP");
    assert_eq!(scan.action_plan[1].priority.as_str(), "Medium");
}

#[tokio::test]
async fn test_upload_success_navigates_to_report() {
    let server = StubServer::spawn(vec![Route::post(
        "/scan/upload",
        200,
        r#"{"scan_id": "c0ffee12", "health_score": 91,
            "pest_detections": [{"label": "Aphids", "confidence": 0.87, "box": [1, 2, 3, 4]}],
            "action_plan": ["Spray neem oil"], "alerts": ["Aphids detected"], "db_id": 40}"#,
    )])
    .await;

    let mut session = session(&server.base_url);
    let view = session.upload(&jpeg()).await.unwrap();

    assert_eq!(view.id.as_str(), "c0ffee12");
    assert_eq!(view.field_name, "New Drone Scan");
    assert_eq!(view.status.map(|s| s.as_str()), Some("critical"));
    assert!(view.timestamp.is_some());

    let state = session.state();
    assert_eq!(state.current_view, View::Report);
    assert_eq!(state.selected_scan.as_ref(), Some(&view));
    assert!(!state.upload_in_flight);
    assert!(state.alert.is_none());

    let request = &server.requests()[0];
    assert!(request.target.contains("user_name=Asha"));
    assert!(request.target.contains("lang=en"));
}

#[tokio::test]
async fn test_upload_failure_sets_alert() {
    let server = StubServer::spawn(vec![Route::post(
        "/scan/upload",
        400,
        r#"{"detail": "File must be an image"}"#,
    )])
    .await;

    let mut session = session(&server.base_url);
    let err = session.upload(&jpeg()).await.unwrap_err();
    assert!(matches!(err, AgriScanError::Api(_)));

    let state = session.state();
    assert_eq!(state.current_view, View::Dashboard);
    assert_eq!(state.alert.as_deref(), Some("File must be an image"));
    assert!(!state.upload_in_flight);
}

#[tokio::test]
async fn test_upload_without_scan_id_fails_loudly() {
    let server = StubServer::spawn(vec![Route::post(
        "/scan/upload",
        200,
        r#"{"health_score": 50}"#,
    )])
    .await;

    let mut session = session(&server.base_url);
    let err = session.upload(&jpeg()).await.unwrap_err();
    assert!(matches!(
        err,
        AgriScanError::Common(agriscan_common::Error::MissingScanId)
    ));
    assert_eq!(session.state().alert.as_deref(), Some("Failed to analyze image."));
}

#[tokio::test]
async fn test_map_layers_loaded_for_selected_scan() {
    let server = StubServer::spawn(vec![Route::get(
        "/map/layers/7",
        200,
        r#"{"rgb_url": "http://x/rgb.jpg", "ndvi_url": null, "pest_map_url": "http://x/pest.jpg"}"#,
    )])
    .await;

    let mut session = session(&server.base_url);

    // 未選択なら取りに行かない
    session.load_map_layers().await;
    assert!(server.requests().is_empty());

    session.dispatch(agriscan_common::Action::SetSelectedScan(Some(
        agriscan_common::ScanView::new("7".into(), "Scan #7"),
    )));
    session.load_map_layers().await;

    let layers = session.state().map_layers.as_ref().unwrap();
    assert_eq!(layers.pest_map_url.as_deref(), Some("http://x/pest.jpg"));
}
