use crate::api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgriScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("スキャンが見つかりません: {0}")]
    ScanNotFound(String),

    #[error("アップロード処理中です。完了を待ってから再実行してください")]
    UploadInFlight,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Common(#[from] agriscan_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for AgriScanError {
    fn from(e: dialoguer::Error) -> Self {
        AgriScanError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgriScanError>;
