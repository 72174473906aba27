use agriscan_common::{backend_detail, upload_failure_message, ApiErrorKind};
use thiserror::Error;

/// バックエンド呼び出しの失敗
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// 非2xxのときのHTTPステータス
    pub status: Option<u16>,
    /// バックエンドが付けた `detail`
    pub detail: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            detail: None,
            message: format!("API接続エラー: {}", cause),
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: ApiErrorKind::Timeout,
            status: None,
            detail: None,
            message: "APIがタイムアウトしました".into(),
        }
    }

    /// 非2xxレスポンス（本文から detail を拾う）
    pub fn server(status: u16, body: &str) -> Self {
        let detail = backend_detail(body);
        let message = match &detail {
            Some(detail) => format!("APIエラー (HTTP {}): {}", status, detail),
            None => format!("APIエラー (HTTP {})", status),
        };
        Self {
            kind: ApiErrorKind::Server,
            status: Some(status),
            detail,
            message,
        }
    }

    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: None,
            detail: None,
            message: format!("APIレスポンスのパースに失敗: {}", cause),
        }
    }

    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout()
        } else if e.is_decode() {
            Self::decode(e)
        } else {
            Self::network(e)
        }
    }

    /// 画面に出すアップロード失敗文言
    pub fn user_message(&self) -> String {
        upload_failure_message(self.detail.as_deref())
    }
}
