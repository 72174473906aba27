//! アップロードする画像の読み込み

use crate::error::{AgriScanError, Result};
use std::path::Path;

/// multipart で送る1枚の画像
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// ファイルを読み、中身から画像形式を判定する（拡張子は見ない）
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AgriScanError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "scan.jpg".to_string());

        Self::from_bytes(file_name, bytes)
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let format = image::guess_format(&bytes)
            .map_err(|_| AgriScanError::NotAnImage(file_name.clone()))?;

        Ok(Self {
            file_name,
            mime: format.to_mime_type(),
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
