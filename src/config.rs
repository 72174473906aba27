use crate::error::{AgriScanError, Result};
use agriscan_common::endpoints::{DEFAULT_API_BASE_URL, DEFAULT_RECENT_SCAN_LIMIT};
use agriscan_common::i18n;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIの接続先を上書きする環境変数
pub const API_URL_ENV: &str = "AGRISCAN_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub language: String,
    pub user_name: Option<String>,
    pub timeout_seconds: u64,
    pub recent_scan_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            language: i18n::FALLBACK_LANGUAGE.into(),
            user_name: None,
            timeout_seconds: 30,
            recent_scan_limit: DEFAULT_RECENT_SCAN_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AgriScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("agriscan").join("config.json"))
    }

    /// 接続先（環境変数を優先）
    pub fn api_base_url(&self) -> String {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => self.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AgriScanError::Config(format!(
                "URLは http:// か https:// で始めてください: {}",
                url
            )));
        }
        self.api_base_url = url;
        Ok(())
    }

    pub fn set_language(&mut self, code: String) -> Result<()> {
        if !i18n::is_supported(&code) {
            let codes: Vec<&str> = i18n::SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
            return Err(AgriScanError::Config(format!(
                "未対応の言語です: {} (対応: {})",
                code,
                codes.join(", ")
            )));
        }
        self.language = code;
        Ok(())
    }

    pub fn set_user_name(&mut self, name: String) {
        let name = name.trim();
        self.user_name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }
}
