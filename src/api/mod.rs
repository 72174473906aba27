//! バックエンドAPIクライアント
//!
//! 読み取り系（統計・一覧・マップレイヤー）は失敗を `None` に畳み、
//! 呼び出し側はデモデータで描画を続ける。アップロードだけは失敗を返す。

mod error;
mod upload;

pub use error::ApiError;
pub use upload::ImageUpload;

use crate::config::Config;
use crate::error::{AgriScanError, Result};
use agriscan_common::endpoints;
use agriscan_common::{MapLayers, RawScan, Stats, UploadResult};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgriScanError::Config(format!("HTTPクライアントを作れません: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            Duration::from_secs(config.timeout_seconds.max(1)),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 静的ファイル（スキャン画像）の配信元
    pub fn backend_origin(&self) -> String {
        endpoints::backend_origin(&self.base_url)
    }

    pub async fn try_dashboard_stats(&self) -> ApiResult<Stats> {
        let url = endpoints::stats_url(&self.base_url);
        self.get_json(self.http.get(&url), &url).await
    }

    /// 統計（失敗時は None）
    pub async fn get_dashboard_stats(&self) -> Option<Stats> {
        soft("dashboard stats", self.try_dashboard_stats().await)
    }

    pub async fn try_recent_scans(&self, limit: u32) -> ApiResult<Vec<RawScan>> {
        let url = endpoints::scans_url(&self.base_url);
        let request = self.http.get(&url).query(&endpoints::scans_query(limit)[..]);
        self.get_json(request, &url).await
    }

    /// 最近のスキャン（新しい順、失敗時は None）
    pub async fn get_recent_scans(&self, limit: u32) -> Option<Vec<RawScan>> {
        soft("recent scans", self.try_recent_scans(limit).await)
    }

    pub async fn try_map_layers(&self, scan_id: &str) -> ApiResult<MapLayers> {
        let url = endpoints::map_layers_url(&self.base_url, scan_id);
        self.get_json(self.http.get(&url), &url).await
    }

    pub async fn get_map_layers(&self, scan_id: &str) -> Option<MapLayers> {
        soft("map layers", self.try_map_layers(scan_id).await)
    }

    /// 画像1枚をアップロードして解析結果を受け取る
    pub async fn upload_scan(
        &self,
        image: &ImageUpload,
        user_name: &str,
        language: &str,
    ) -> ApiResult<UploadResult> {
        let url = endpoints::upload_url(&self.base_url);
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime)
            .map_err(ApiError::from_reqwest)?;
        let form = Form::new().part(endpoints::UPLOAD_FIELD, part);

        debug!(
            file = %image.file_name,
            bytes = image.size(),
            user_name,
            language,
            "uploading scan"
        );

        let request = self
            .http
            .post(&url)
            .query(&endpoints::upload_query(user_name, language)[..])
            .multipart(form);
        self.get_json(request, &url).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> ApiResult<T> {
        debug!(url, "request");
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_reqwest)?;

        if !status.is_success() {
            return Err(ApiError::server(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(ApiError::decode)
    }
}

fn soft<T>(what: &str, result: ApiResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(kind = %e.kind, "{} unavailable: {}", what, e);
            None
        }
    }
}
