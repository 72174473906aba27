//! セッション状態ストア
//!
//! 画面遷移・選択中スキャン・言語・接続状態などの画面横断データを1か所で持つ。
//! 変更はすべて Action を reduce に通して行う（純粋関数なのでテストしやすい）。
//!
//! 非同期処理（統計取得・一覧取得・アップロード・レイヤー取得）は RequestToken を持ち、
//! 新しいリクエストが始まった後に古い応答が届いても状態を上書きしない。

use crate::i18n::{self, translate};
use crate::types::{MapLayers, RawScan, ScanView, Stats};
use serde::{Deserialize, Serialize};

/// 主画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Map,
    Report,
    Settings,
}

impl View {
    /// ボトムナビの並び順
    pub const ALL: [View; 4] = [View::Dashboard, View::Map, View::Report, View::Settings];

    pub fn tag(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Map => "map",
            View::Report => "report",
            View::Settings => "settings",
        }
    }

    pub fn parse(tag: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.tag() == tag)
    }

    /// 未知のタグはダッシュボード扱い
    pub fn from_tag(tag: &str) -> View {
        View::parse(tag).unwrap_or_default()
    }

    /// ボトムナビの翻訳キー
    pub fn label_key(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Map => "map",
            View::Report => "reports",
            View::Settings => "settings",
        }
    }

    /// 新規スキャンボタンを出す画面か
    pub fn shows_fab(&self) -> bool {
        matches!(self, View::Dashboard | View::Map)
    }
}

/// フィールドマップの表示レイヤー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapLayer {
    #[default]
    Rgb,
    Ndvi,
    Pest,
}

impl MapLayer {
    pub const ALL: [MapLayer; 3] = [MapLayer::Rgb, MapLayer::Ndvi, MapLayer::Pest];

    pub fn tag(&self) -> &'static str {
        match self {
            MapLayer::Rgb => "rgb",
            MapLayer::Ndvi => "ndvi",
            MapLayer::Pest => "pest",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapLayer::Rgb => "RGB View",
            MapLayer::Ndvi => "NDVI View",
            MapLayer::Pest => "Pest Map",
        }
    }

    pub fn parse(tag: &str) -> Option<MapLayer> {
        MapLayer::ALL.into_iter().find(|l| l.tag() == tag)
    }

    /// 未知のタグは rgb に丸める（空白のマップにしない）
    pub fn from_tag(tag: &str) -> MapLayer {
        MapLayer::parse(tag).unwrap_or_default()
    }
}

/// 起動時ウィザードの段階
///
/// Splash → Language → Name → Done。Done になったら戻らない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplashStep {
    #[default]
    Splash,
    Language,
    Name,
    Done,
}

/// 非同期リクエストの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Stats,
    RecentScans,
    Upload,
    MapLayers,
}

/// 応答が最新のリクエストのものか判定するための札
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Generations {
    stats: u64,
    recent_scans: u64,
    upload: u64,
    map_layers: u64,
}

impl Generations {
    fn get(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Stats => self.stats,
            RequestKind::RecentScans => self.recent_scans,
            RequestKind::Upload => self.upload,
            RequestKind::MapLayers => self.map_layers,
        }
    }

    fn bump(&mut self, kind: RequestKind) {
        let slot = match kind {
            RequestKind::Stats => &mut self.stats,
            RequestKind::RecentScans => &mut self.recent_scans,
            RequestKind::Upload => &mut self.upload,
            RequestKind::MapLayers => &mut self.map_layers,
        };
        *slot += 1;
    }
}

/// 最近のスキャン一覧の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScanList {
    /// まだ取得していない（オフライン時はこのまま）
    #[default]
    NotRequested,
    Loading,
    Loaded(Vec<RawScan>),
}

/// データの出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// バックエンドの値
    Live,
    /// 内蔵のデモ値（オフライン）
    Demo,
}

/// 状態を変える唯一の手段
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLanguage(String),
    SetUserName(String),
    SetCurrentView(View),
    SetSelectedScan(Option<ScanView>),
    SetMapLayer(MapLayer),
    /// スキャンを選んでレポートへ
    OpenScan(ScanView),
    /// 常にダッシュボードへ戻る
    Back,
    SplashElapsed,
    ChooseLanguage(String),
    SubmitName(String),
    RequestStarted(RequestKind),
    StatsResolved {
        token: RequestToken,
        stats: Option<Stats>,
    },
    ScansResolved {
        token: RequestToken,
        scans: Option<Vec<RawScan>>,
    },
    MapLayersResolved {
        token: RequestToken,
        layers: Option<MapLayers>,
    },
    UploadSucceeded {
        token: RequestToken,
        scan: ScanView,
    },
    UploadFailed {
        token: RequestToken,
        message: String,
    },
    DismissAlert,
}

impl Action {
    /// 文字列タグから画面遷移
    pub fn navigate_tag(tag: &str) -> Action {
        Action::SetCurrentView(View::from_tag(tag))
    }

    /// 文字列タグからレイヤー切替（未知のタグは rgb）
    pub fn map_layer_tag(tag: &str) -> Action {
        Action::SetMapLayer(MapLayer::from_tag(tag))
    }
}

/// セッション状態
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub language: String,
    pub current_view: View,
    pub selected_scan: Option<ScanView>,
    pub map_layer: MapLayer,
    pub user_name: String,
    pub is_connected: bool,
    pub api_stats: Option<Stats>,
    pub splash: SplashStep,
    pub recent_scans: ScanList,
    pub map_layers: Option<MapLayers>,
    pub upload_in_flight: bool,
    /// 利用者に見せる必要があるエラー（アップロード失敗）
    pub alert: Option<String>,
    generations: Generations,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            language: i18n::FALLBACK_LANGUAGE.to_string(),
            current_view: View::Dashboard,
            selected_scan: None,
            map_layer: MapLayer::Rgb,
            user_name: String::new(),
            is_connected: false,
            api_stats: None,
            splash: SplashStep::Splash,
            recent_scans: ScanList::NotRequested,
            map_layers: None,
            upload_in_flight: false,
            alert: None,
            generations: Generations::default(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ウィザードを済ませた状態で始める（CLIの単発コマンド用）
    pub fn onboarded(language: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            user_name: user_name.into(),
            splash: SplashStep::Done,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(self);
        *self = reduce(state, action);
    }

    /// 表示文字列（言語 → 英語 → キー）
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(&self.language, key)
    }

    pub fn data_mode(&self) -> DataMode {
        if self.is_connected && self.api_stats.is_some() {
            DataMode::Live
        } else {
            DataMode::Demo
        }
    }

    pub fn shows_fab(&self) -> bool {
        self.current_view.shows_fab()
    }

    pub fn is_onboarded(&self) -> bool {
        self.splash == SplashStep::Done
    }

    /// そのリクエストを今始めてよいか
    ///
    /// 統計の疎通確認はセッションに1回だけ。アップロードは同時に1件まで。
    pub fn can_start(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::Stats => self.generations.stats == 0,
            RequestKind::Upload => !self.upload_in_flight,
            RequestKind::RecentScans | RequestKind::MapLayers => true,
        }
    }

    /// 現在の世代の札
    pub fn token(&self, kind: RequestKind) -> RequestToken {
        RequestToken {
            kind,
            generation: self.generations.get(kind),
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generations.get(token.kind) == token.generation
    }

    /// リクエスト開始を記録して札を返す（始められなければ None）
    pub fn begin(&mut self, kind: RequestKind) -> Option<RequestToken> {
        if !self.can_start(kind) {
            return None;
        }
        self.dispatch(Action::RequestStarted(kind));
        Some(self.token(kind))
    }
}

impl SessionState {
    /// 選択中スキャンを差し替える
    ///
    /// 前のスキャン向けに取得中のレイヤーは世代を進めて無効にする。
    fn replace_selected_scan(&mut self, scan: Option<ScanView>) {
        self.selected_scan = scan;
        self.map_layers = None;
        self.generations.bump(RequestKind::MapLayers);
    }
}

/// 状態遷移
pub fn reduce(mut state: SessionState, action: Action) -> SessionState {
    match action {
        Action::SetLanguage(code) => {
            state.language = code;
        }
        Action::SetUserName(name) => {
            state.user_name = name;
        }
        Action::SetCurrentView(view) => {
            state.current_view = view;
        }
        Action::SetSelectedScan(scan) => {
            state.replace_selected_scan(scan);
        }
        Action::SetMapLayer(layer) => {
            state.map_layer = layer;
        }
        Action::OpenScan(scan) => {
            state.replace_selected_scan(Some(scan));
            state.current_view = View::Report;
        }
        Action::Back => {
            state.current_view = View::Dashboard;
        }
        Action::SplashElapsed => {
            if state.splash == SplashStep::Splash {
                state.splash = SplashStep::Language;
            }
        }
        Action::ChooseLanguage(code) => {
            if matches!(state.splash, SplashStep::Splash | SplashStep::Language) {
                state.language = code;
                state.splash = SplashStep::Name;
            }
        }
        Action::SubmitName(name) => {
            let name = name.trim();
            if state.splash == SplashStep::Name && !name.is_empty() {
                state.user_name = name.to_string();
                state.splash = SplashStep::Done;
                state.current_view = View::Dashboard;
            }
        }
        Action::RequestStarted(kind) => {
            if state.can_start(kind) {
                state.generations.bump(kind);
                match kind {
                    RequestKind::RecentScans => state.recent_scans = ScanList::Loading,
                    RequestKind::Upload => {
                        state.upload_in_flight = true;
                        state.alert = None;
                    }
                    RequestKind::Stats | RequestKind::MapLayers => {}
                }
            }
        }
        Action::StatsResolved { token, stats } => {
            if state.is_current(token) {
                // 失敗時は未接続のまま（再試行しない）
                if let Some(stats) = stats {
                    state.api_stats = Some(stats);
                    state.is_connected = true;
                }
            }
        }
        Action::ScansResolved { token, scans } => {
            if state.is_current(token) {
                state.recent_scans = ScanList::Loaded(scans.unwrap_or_default());
            }
        }
        Action::MapLayersResolved { token, layers } => {
            if state.is_current(token) {
                state.map_layers = layers;
            }
        }
        Action::UploadSucceeded { token, scan } => {
            if state.is_current(token) {
                state.upload_in_flight = false;
                state.replace_selected_scan(Some(scan));
                state.current_view = View::Report;
            }
        }
        Action::UploadFailed { token, message } => {
            if state.is_current(token) {
                state.upload_in_flight = false;
                state.alert = Some(message);
            }
        }
        Action::DismissAlert => {
            state.alert = None;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScanId, Weather};

    fn stats() -> Stats {
        Stats {
            projected_yield: "4.2 T/Ha".to_string(),
            active_alerts: 2,
            total_scans: Some(24),
            weather: Weather::default(),
        }
    }

    fn scan(id: &str) -> ScanView {
        ScanView::new(ScanId::from(id), format!("Scan #{}", id))
    }

    #[test]
    fn test_defaults() {
        let state = SessionState::new();
        assert_eq!(state.language, "en");
        assert_eq!(state.current_view, View::Dashboard);
        assert_eq!(state.map_layer, MapLayer::Rgb);
        assert!(!state.is_connected);
        assert!(state.api_stats.is_none());
        assert_eq!(state.data_mode(), DataMode::Demo);
    }

    #[test]
    fn test_view_from_unknown_tag_is_dashboard() {
        assert_eq!(View::from_tag("map"), View::Map);
        assert_eq!(View::from_tag("profile"), View::Dashboard);

        let mut state = SessionState::new();
        state.dispatch(Action::navigate_tag("settings"));
        assert_eq!(state.current_view, View::Settings);
        state.dispatch(Action::navigate_tag("unknown"));
        assert_eq!(state.current_view, View::Dashboard);
    }

    #[test]
    fn test_invalid_map_layer_clamps_to_rgb() {
        let mut state = SessionState::new();
        state.dispatch(Action::map_layer_tag("ndvi"));
        assert_eq!(state.map_layer, MapLayer::Ndvi);
        state.dispatch(Action::map_layer_tag("invalid"));
        assert_eq!(state.map_layer, MapLayer::Rgb);
    }

    #[test]
    fn test_translation_through_state() {
        let mut state = SessionState::new();
        state.dispatch(Action::SetLanguage("or".to_string()));
        assert_eq!(state.t("goodEvening"), "Good Evening,");
        assert_eq!(state.t("nonexistent_key"), "nonexistent_key");
        assert_eq!(state.t("settings"), "ସେଟିଂସ");
    }

    #[test]
    fn test_selected_scan_is_replaced_wholesale() {
        let mut first = scan("1");
        first.n_level = Some("Low".to_string());
        let second = scan("2");

        let mut state = SessionState::new();
        state.dispatch(Action::SetSelectedScan(Some(first)));
        state.dispatch(Action::SetSelectedScan(Some(second.clone())));
        assert_eq!(state.selected_scan, Some(second));

        state.dispatch(Action::SetSelectedScan(None));
        assert!(state.selected_scan.is_none());
    }

    #[test]
    fn test_open_scan_and_back() {
        let mut state = SessionState::new();
        state.dispatch(Action::SetCurrentView(View::Map));
        state.dispatch(Action::OpenScan(scan("5")));
        assert_eq!(state.current_view, View::Report);

        state.dispatch(Action::Back);
        assert_eq!(state.current_view, View::Dashboard);
    }

    #[test]
    fn test_stats_probe_success_connects() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::Stats).expect("開始できない");
        state.dispatch(Action::StatsResolved { token, stats: Some(stats()) });

        assert!(state.is_connected);
        assert_eq!(state.api_stats, Some(stats()));
        assert_eq!(state.data_mode(), DataMode::Live);
    }

    #[test]
    fn test_stats_probe_failure_stays_offline_without_retry() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::Stats).expect("開始できない");
        state.dispatch(Action::StatsResolved { token, stats: None });

        assert!(!state.is_connected);
        assert!(state.api_stats.is_none());
        assert!(state.begin(RequestKind::Stats).is_none());
    }

    #[test]
    fn test_stale_scan_response_is_ignored() {
        let mut state = SessionState::new();
        let old = state.begin(RequestKind::RecentScans).expect("開始できない");
        let new = state.begin(RequestKind::RecentScans).expect("開始できない");
        assert_eq!(state.recent_scans, ScanList::Loading);

        let fresh = vec![RawScan { id: Some(ScanId::from("2")), ..Default::default() }];
        state.dispatch(Action::ScansResolved { token: new, scans: Some(fresh.clone()) });
        state.dispatch(Action::ScansResolved {
            token: old,
            scans: Some(vec![RawScan::default()]),
        });

        assert_eq!(state.recent_scans, ScanList::Loaded(fresh));
    }

    #[test]
    fn test_failed_scan_fetch_is_empty_list() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::RecentScans).expect("開始できない");
        state.dispatch(Action::ScansResolved { token, scans: None });
        assert_eq!(state.recent_scans, ScanList::Loaded(Vec::new()));
    }

    #[test]
    fn test_upload_rejected_while_in_flight() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::Upload).expect("開始できない");
        assert!(state.upload_in_flight);
        assert!(state.begin(RequestKind::Upload).is_none());

        state.dispatch(Action::UploadSucceeded { token, scan: scan("c0ffee") });
        assert!(!state.upload_in_flight);
        assert_eq!(state.current_view, View::Report);
        assert!(state.begin(RequestKind::Upload).is_some());
    }

    #[test]
    fn test_upload_failure_sets_alert_and_keeps_view() {
        let mut state = SessionState::new();
        state.dispatch(Action::SetCurrentView(View::Map));
        let token = state.begin(RequestKind::Upload).expect("開始できない");
        state.dispatch(Action::UploadFailed {
            token,
            message: "File must be an image".to_string(),
        });

        assert_eq!(state.current_view, View::Map);
        assert_eq!(state.alert.as_deref(), Some("File must be an image"));
        assert!(!state.upload_in_flight);

        state.dispatch(Action::DismissAlert);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_map_layers_reset_when_scan_changes() {
        let mut state = SessionState::new();
        let token = state.begin(RequestKind::MapLayers).expect("開始できない");
        state.dispatch(Action::MapLayersResolved {
            token,
            layers: Some(MapLayers::default()),
        });
        assert!(state.map_layers.is_some());

        state.dispatch(Action::OpenScan(scan("3")));
        assert!(state.map_layers.is_none());
    }

    #[test]
    fn test_splash_wizard_completes_once() {
        let mut state = SessionState::new();
        assert!(!state.is_onboarded());

        state.dispatch(Action::SplashElapsed);
        assert_eq!(state.splash, SplashStep::Language);

        state.dispatch(Action::ChooseLanguage("hi".to_string()));
        assert_eq!(state.splash, SplashStep::Name);
        assert_eq!(state.language, "hi");

        state.dispatch(Action::SubmitName("   ".to_string()));
        assert_eq!(state.splash, SplashStep::Name);

        state.dispatch(Action::SubmitName("  Asha ".to_string()));
        assert!(state.is_onboarded());
        assert_eq!(state.user_name, "Asha");
        assert_eq!(state.current_view, View::Dashboard);

        // 完了後はウィザードに戻らない
        state.dispatch(Action::ChooseLanguage("or".to_string()));
        state.dispatch(Action::SplashElapsed);
        assert!(state.is_onboarded());
        assert_eq!(state.language, "hi");
    }

    #[test]
    fn test_fab_visibility() {
        assert!(View::Dashboard.shows_fab());
        assert!(View::Map.shows_fab());
        assert!(!View::Report.shows_fab());
        assert!(!View::Settings.shows_fab());
    }

    #[test]
    fn test_onboarded_constructor() {
        let state = SessionState::onboarded("or", "Rajesh");
        assert!(state.is_onboarded());
        assert_eq!(state.language, "or");
        assert_eq!(state.user_name, "Rajesh");
    }

    #[test]
    fn test_layers_for_previous_scan_are_dropped() {
        let mut state = SessionState::new();
        state.dispatch(Action::OpenScan(scan("A")));
        let token_a = state.begin(RequestKind::MapLayers).expect("開始できない");

        state.dispatch(Action::OpenScan(scan("B")));
        state.dispatch(Action::MapLayersResolved {
            token: token_a,
            layers: Some(MapLayers {
                rgb_url: Some("A-rgb".to_string()),
                ..Default::default()
            }),
        });

        assert_eq!(state.selected_scan.as_ref().map(|s| s.id.as_str()), Some("B"));
        assert!(state.map_layers.is_none());

        // B 向けに取り直した結果は反映される
        let token_b = state.begin(RequestKind::MapLayers).expect("開始できない");
        state.dispatch(Action::MapLayersResolved {
            token: token_b,
            layers: Some(MapLayers {
                rgb_url: Some("B-rgb".to_string()),
                ..Default::default()
            }),
        });
        assert_eq!(
            state.map_layers.and_then(|l| l.rgb_url).as_deref(),
            Some("B-rgb")
        );
    }

    #[test]
    fn test_upload_invalidates_pending_layers() {
        let mut state = SessionState::new();
        state.dispatch(Action::SetSelectedScan(Some(scan("A"))));
        let layers_token = state.begin(RequestKind::MapLayers).expect("開始できない");
        let upload_token = state.begin(RequestKind::Upload).expect("開始できない");

        state.dispatch(Action::UploadSucceeded {
            token: upload_token,
            scan: scan("C"),
        });
        state.dispatch(Action::MapLayersResolved {
            token: layers_token,
            layers: Some(MapLayers::default()),
        });
        assert!(state.map_layers.is_none());
    }
}
