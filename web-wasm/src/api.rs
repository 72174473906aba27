//! バックエンドAPI（fetch）
//!
//! 読み取り系は失敗を None に畳む。アップロードだけは WebApiError を返す。
//! すべてのリクエストは AbortController のタイムアウト付き。

use agriscan_common::endpoints::{self, DEFAULT_API_BASE_URL};
use agriscan_common::{
    backend_detail, upload_failure_message, ApiErrorKind, MapLayers, RawScan, Stats, UploadResult,
};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, RequestMode, Response};

const TIMEOUT_MS: u32 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct WebApiError {
    pub kind: ApiErrorKind,
    pub detail: Option<String>,
    pub message: String,
}

impl WebApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            detail: None,
            message: message.into(),
        }
    }

    fn from_js(kind: ApiErrorKind, value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| js_sys::Error::from(value).message().as_string())
            .unwrap_or_else(|| kind.to_string());
        Self::new(kind, message)
    }

    /// alert に出す文言
    pub fn user_message(&self) -> String {
        upload_failure_message(self.detail.as_deref())
    }
}

type ApiResult<T> = Result<T, WebApiError>;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn backend_origin(&self) -> String {
        endpoints::backend_origin(&self.base_url)
    }

    pub async fn get_dashboard_stats(&self) -> Option<Stats> {
        soft("dashboard stats", self.get(&endpoints::stats_url(&self.base_url)).await)
    }

    pub async fn get_recent_scans(&self, limit: u32) -> Option<Vec<RawScan>> {
        let url = with_query(&endpoints::scans_url(&self.base_url), &endpoints::scans_query(limit));
        soft("recent scans", self.get(&url).await)
    }

    pub async fn get_map_layers(&self, scan_id: &str) -> Option<MapLayers> {
        let url = endpoints::map_layers_url(&self.base_url, scan_id);
        soft("map layers", self.get(&url).await)
    }

    pub async fn upload_scan(
        &self,
        file: &File,
        user_name: &str,
        language: &str,
    ) -> ApiResult<UploadResult> {
        let url = with_query(
            &endpoints::upload_url(&self.base_url),
            &endpoints::upload_query(user_name, language),
        );

        let form = FormData::new().map_err(|e| WebApiError::from_js(ApiErrorKind::Network, e))?;
        form.append_with_blob_and_filename(endpoints::UPLOAD_FIELD, file, &file.name())
            .map_err(|e| WebApiError::from_js(ApiErrorKind::Network, e))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from(form));
        send(&url, init).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let init = RequestInit::new();
        init.set_method("GET");
        send(url, init).await
    }
}

async fn send<T: DeserializeOwned>(url: &str, init: RequestInit) -> ApiResult<T> {
    let window = web_sys::window()
        .ok_or_else(|| WebApiError::new(ApiErrorKind::Network, "window がありません"))?;
    let controller =
        AbortController::new().map_err(|e| WebApiError::from_js(ApiErrorKind::Network, e))?;

    init.set_mode(RequestMode::Cors);
    init.set_signal(Some(&controller.signal()));
    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| WebApiError::from_js(ApiErrorKind::Network, e))?;

    let exchange = Box::pin(async move {
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| WebApiError::from_js(ApiErrorKind::Network, e))?;
        let response: Response = value
            .dyn_into()
            .map_err(|e| WebApiError::from_js(ApiErrorKind::Decode, e))?;
        read_response(response).await
    });

    match select(exchange, Box::pin(TimeoutFuture::new(TIMEOUT_MS))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            controller.abort();
            Err(WebApiError::new(ApiErrorKind::Timeout, "request timed out"))
        }
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if !response.ok() {
        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        return Err(WebApiError {
            kind: ApiErrorKind::Server,
            detail: backend_detail(&body),
            message: format!("HTTP {}", status),
        });
    }

    let promise = response
        .text()
        .map_err(|e| WebApiError::from_js(ApiErrorKind::Decode, e))?;
    let body = JsFuture::from(promise)
        .await
        .map_err(|e| WebApiError::from_js(ApiErrorKind::Network, e))?
        .as_string()
        .unwrap_or_default();
    serde_json::from_str(&body).map_err(|e| WebApiError::new(ApiErrorKind::Decode, e.to_string()))
}

fn with_query(url: &str, pairs: &[(&str, String)]) -> String {
    let query: Vec<String> = pairs
        .iter()
        .map(|(key, value)| {
            let encoded: String = js_sys::encode_uri_component(value).into();
            format!("{}={}", key, encoded)
        })
        .collect();
    format!("{}?{}", url, query.join("&"))
}

fn soft<T>(what: &str, result: ApiResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            gloo::console::warn!(format!("{} unavailable ({}): {}", what, e.kind, e.message));
            None
        }
    }
}
