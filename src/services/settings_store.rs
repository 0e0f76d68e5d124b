//! GitHub 设置存储
//!
//! 以 TOML 文件保存 token / owner / repo，推送时每次重新读取

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::models::StoredSettings;

/// 设置的键值存储
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// 读取设置；不存在时返回全部为空的设置
    async fn load(&self) -> Result<StoredSettings>;

    async fn save(&self, settings: &StoredSettings) -> Result<()>;

    /// 清除全部设置
    async fn clear(&self) -> Result<()>;
}

/// 基于 TOML 文件的存储
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn load(&self) -> Result<StoredSettings> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("设置文件不存在: {}", self.path.display());
            return Ok(StoredSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("无法读取设置文件: {}", self.path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("无法解析设置文件: {}", self.path.display()))
    }

    async fn save(&self, settings: &StoredSettings) -> Result<()> {
        let content = toml::to_string(settings).context("无法序列化设置")?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("无法写入设置文件: {}", self.path.display()))
    }

    async fn clear(&self) -> Result<()> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            fs::remove_file(&self.path)
                .await
                .with_context(|| format!("无法删除设置文件: {}", self.path.display()))?;
        }
        Ok(())
    }
}
