use crate::error::{Result, ThirdEyeError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "THIRD_EYE_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;

        // 環境変数を優先
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 編集用に保存済みの設定を読む。JSONが壊れていれば既定値から作り直す
    pub fn load_for_edit(path: &std::path::Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(ThirdEyeError::JsonParse(e)) => {
                log::warn!("{} is corrupt ({}); starting from defaults", path.display(), e);
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ThirdEyeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("third-eye").join("config.json"))
    }

    /// ベースURLを検証して設定
    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ThirdEyeError::Config(format!(
                "ベースURLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = url;
        Ok(())
    }
}
