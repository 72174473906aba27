//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scan record has no identifier")]
    MissingScanId,

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// API呼び出しの失敗種別
///
/// CLIとWebのクライアントで同じ分類を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 接続できない・送信できない
    Network,
    /// タイムアウト
    Timeout,
    /// 非2xxレスポンス
    Server,
    /// レスポンスのデコード失敗
    Decode,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "network",
            ApiErrorKind::Timeout => "timeout",
            ApiErrorKind::Server => "server",
            ApiErrorKind::Decode => "decode",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// アップロード失敗時、バックエンドの説明が無いときの文言
pub const GENERIC_UPLOAD_FAILURE: &str = "Failed to analyze image.";

/// エラーレスポンス本文から `detail` を取り出す
///
/// `{"detail": "..."}` の文字列形式と、検証エラーの `{"detail": [{"msg": ...}]}` 形式を扱う。
pub fn backend_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

/// 利用者に見せるアップロード失敗メッセージ
pub fn upload_failure_message(detail: Option<&str>) -> String {
    detail
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(GENERIC_UPLOAD_FAILURE)
        .to_string()
}
