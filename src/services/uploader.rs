//! 推送服务 - 业务能力层
//!
//! 先检查后写入的 upsert：
//! 1. 读取设置，缺失时直接返回 `NotConfigured`
//! 2. GET 目标文件，成功则取得 sha，其余情况一律视为没有 sha
//! 3. PUT 新内容，带上第 2 步的 sha（没有则省略）
//!
//! 两步之间没有事务保证，期间若有其他写入，PUT 会以冲突失败，这里不重试。

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::{ContentsApi, PutContentsBody};
use crate::error::{SyncError, SyncResult};
use crate::models::{PushRequest, RemoteFileTarget};
use crate::services::settings_store::SettingsStore;

/// 推送服务
pub struct SolutionUploader {
    api: Arc<dyn ContentsApi>,
    store: Arc<dyn SettingsStore>,
}

impl SolutionUploader {
    pub fn new(api: Arc<dyn ContentsApi>, store: Arc<dyn SettingsStore>) -> Self {
        Self { api, store }
    }

    /// 创建或覆盖远端文件
    ///
    /// 每次推送都重新读取设置，先查询 sha，再写入。
    ///
    /// # 参数
    /// - `request`: 文件名与代码
    ///
    /// # 返回
    /// 写入成功返回 `Ok(())`；冲突不重试，原样返回远端信息
    pub async fn push(&self, request: &PushRequest) -> SyncResult<()> {
        let settings = self
            .store
            .load()
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?
            .complete()
            .ok_or(SyncError::NotConfigured)?;

        let target = RemoteFileTarget {
            file_name: request.file_name.clone(),
            owner: settings.owner,
            repo: settings.repo,
        };
        info!(
            "🚀 推送 {} 到 {}/{}",
            target.file_name, target.owner, target.repo
        );

        let sha = self.existing_sha(&settings.token, &target).await?;
        let body = PutContentsBody::new(&target.file_name, &request.code, sha);

        let response = self.api.put_contents(&settings.token, &target, &body).await?;
        debug!("GitHub response: {}", response.body);

        if !response.is_success() {
            let message = response
                .message()
                .unwrap_or(SyncError::GENERIC_PUSH_FAILURE)
                .to_string();
            warn!("❌ 推送失败 (HTTP {}): {}", response.status, message);
            return Err(if response.status == 409 {
                SyncError::RemoteWriteConflict { message }
            } else {
                SyncError::Remote { message }
            });
        }

        info!("✅ 已推送 {}", target.file_name);
        Ok(())
    }

    /// 读取已存在文件的 sha
    ///
    /// 任何非成功响应（包括 404）都视为文件不存在。
    async fn existing_sha(&self, token: &str, target: &RemoteFileTarget) -> SyncResult<Option<String>> {
        let response = self.api.get_contents(token, target).await?;

        if !response.is_success() {
            debug!("文件不存在或无法读取 (HTTP {})，将新建", response.status);
            return Ok(None);
        }

        let sha = response.sha().map(str::to_string);
        debug!("已存在文件 sha: {:?}", sha);
        Ok(sha)
    }
}
