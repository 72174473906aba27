//! セッション: 状態ストアとAPIクライアントをつなぐ
//!
//! 非同期呼び出しの前に `begin` で札を取り、結果は札付きの Action として戻す。
//! 古い札の応答は reducer が捨てる。

use crate::api::{ApiClient, ImageUpload};
use crate::error::{AgriScanError, Result};
use agriscan_common::{
    from_dashboard_scan, from_upload, Action, RawScan, RequestKind, ScanView, SessionState,
    GENERIC_UPLOAD_FAILURE,
};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

pub struct Session {
    state: SessionState,
    client: ApiClient,
    scan_limit: u32,
}

impl Session {
    pub fn new(client: ApiClient, state: SessionState, scan_limit: u32) -> Self {
        Self {
            state,
            client,
            scan_limit,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state.dispatch(action);
    }

    /// 起動時の疎通確認（セッションに1回）
    ///
    /// 繋がれば最近のスキャンも取りに行く。失敗してもデモ表示で続行する。
    pub async fn connect(&mut self) {
        let Some(token) = self.state.begin(RequestKind::Stats) else {
            debug!("stats probe already done");
            return;
        };

        let stats = self.client.get_dashboard_stats().await;
        self.dispatch(Action::StatsResolved { token, stats });

        if self.state.is_connected {
            info!(base_url = self.client.base_url(), "connected to backend");
            self.refresh_scans().await;
        } else {
            warn!("backend unreachable, using demo data");
        }
    }

    /// 最近のスキャンを取り直す（オフライン時は取りに行かない）
    pub async fn refresh_scans(&mut self) {
        if !self.state.is_connected {
            return;
        }
        let Some(token) = self.state.begin(RequestKind::RecentScans) else {
            return;
        };
        let scans = self.client.get_recent_scans(self.scan_limit).await;
        self.dispatch(Action::ScansResolved { token, scans });
    }

    /// 一覧のスキャンを開いてレポートへ
    pub fn open_scan(&mut self, raw: &RawScan) -> Result<()> {
        let view = from_dashboard_scan(raw)?;
        self.dispatch(Action::OpenScan(view));
        Ok(())
    }

    /// 選択中スキャンのマップレイヤー画像を取る
    pub async fn load_map_layers(&mut self) {
        let Some(scan_id) = self.state.selected_scan.as_ref().map(|s| s.id.to_string()) else {
            return;
        };
        let Some(token) = self.state.begin(RequestKind::MapLayers) else {
            return;
        };
        let layers = self.client.get_map_layers(&scan_id).await;
        self.dispatch(Action::MapLayersResolved { token, layers });
    }

    /// 画像をアップロードし、成功したらレポートへ遷移する
    ///
    /// 失敗時は alert に文言を残してエラーを返す。処理中の再実行は受け付けない。
    pub async fn upload(&mut self, image: &ImageUpload) -> Result<ScanView> {
        let token = self
            .state
            .begin(RequestKind::Upload)
            .ok_or(AgriScanError::UploadInFlight)?;

        let user_name = self.state.user_name.clone();
        let language = self.state.language.clone();

        let outcome = match self.client.upload_scan(image, &user_name, &language).await {
            Ok(result) => from_upload(result, &received_at())
                .map_err(|e| (GENERIC_UPLOAD_FAILURE.to_string(), AgriScanError::from(e))),
            Err(e) => Err((e.user_message(), AgriScanError::from(e))),
        };

        match outcome {
            Ok(view) => {
                info!(scan_id = %view.id, health = view.health_score, "scan analyzed");
                self.dispatch(Action::UploadSucceeded {
                    token,
                    scan: view.clone(),
                });
                Ok(view)
            }
            Err((message, err)) => {
                warn!("upload failed: {}", err);
                self.dispatch(Action::UploadFailed { token, message });
                Err(err)
            }
        }
    }
}

fn received_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
