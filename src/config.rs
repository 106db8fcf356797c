use crate::error::{DocShelfError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ブラウザのローカルストレージと同程度の上限
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_dir: Option<PathBuf>,
    pub storage_quota_bytes: usize,
    pub pdf_scale: f32,
    pub prefer_dark: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DocShelfError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("docshelf").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            storage_dir: None,
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            pdf_scale: 1.5,
            prefer_dark: false,
            log_level: "info".into(),
        }
    }

    /// 保存先ディレクトリ（環境変数 > 設定ファイル > データディレクトリ）
    pub fn resolve_storage_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("DOCSHELF_STORAGE_DIR") {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }

        let data = dirs::data_dir()
            .ok_or_else(|| DocShelfError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("docshelf"))
    }

    pub fn set_storage_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.storage_dir = Some(dir);
        self.save()
    }
}
