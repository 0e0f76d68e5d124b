//! 启动时的 GitHub 设置检查
//!
//! token 缺失 → 未配置；token 被拒绝 → 清除本地设置；
//! 未选择仓库 → 列出可选仓库；否则就绪。
//!
//! 环境变量中提供的 token / 仓库会在检查前写入存储。

use anyhow::Result;
use tracing::{info, warn};

use crate::clients::IdentityApi;
use crate::services::settings_store::SettingsStore;

/// 设置状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsStatus {
    NotConfigured,
    /// token 无效，本地设置已清除
    InvalidToken,
    /// token 有效但尚未选择仓库，附带可选仓库（`owner/name`）
    RepoNotSelected { repos: Vec<String> },
    Ready {
        login: String,
        owner: String,
        repo: String,
    },
}

/// 检查本地设置是否可用
///
/// 网络错误会原样返回，由调用方决定是否继续。
///
/// # 参数
/// - `identity`: GitHub 身份接口
/// - `store`: 设置存储；token 被拒绝时会被清空
///
/// # 返回
/// 当前设置状态
pub async fn check_settings(
    identity: &dyn IdentityApi,
    store: &dyn SettingsStore,
) -> Result<SettingsStatus> {
    let stored = store.load().await?;

    let Some(token) = stored.token() else {
        warn!("⚠️ GitHub 未配置：请在设置文件中填写 github_token / repo_owner / repo_name");
        return Ok(SettingsStatus::NotConfigured);
    };

    let user = identity.current_user(token).await?;
    if user.status == 401 {
        warn!("⚠️ GitHub token 无效，已清除本地设置");
        store.clear().await?;
        return Ok(SettingsStatus::InvalidToken);
    }
    if !user.is_success() {
        anyhow::bail!(
            "校验 token 失败 (HTTP {}): {}",
            user.status,
            user.message().unwrap_or("INVALID_TOKEN")
        );
    }
    let login = user
        .body
        .get("login")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    match stored.complete() {
        Some(settings) => {
            info!(
                "✅ GitHub ready: {} → {}/{}",
                login, settings.owner, settings.repo
            );
            Ok(SettingsStatus::Ready {
                login,
                owner: settings.owner,
                repo: settings.repo,
            })
        }
        None => {
            let repos: Vec<String> = identity
                .list_repos(token)
                .await?
                .iter()
                .map(|r| r.full_name())
                .collect();
            warn!("⚠️ 尚未选择仓库，可选: {}", repos.join(", "));
            Ok(SettingsStatus::RepoNotSelected { repos })
        }
    }
}

/// 把外部提供的 token / 仓库合并进设置存储
///
/// 未提供的键保持原值。仓库格式为 `owner/name`。
///
/// # 参数
/// - `store`: 设置存储
/// - `token`: GitHub token
/// - `repo`: 目标仓库，`owner/name`
///
/// # 返回
/// 设置是否发生变化
pub async fn import_settings(
    store: &dyn SettingsStore,
    token: Option<&str>,
    repo: Option<&str>,
) -> Result<bool> {
    let token = token.map(str::trim).filter(|t| !t.is_empty());
    let repo = match repo.map(str::trim).filter(|r| !r.is_empty()) {
        Some(value) => Some(parse_repo(value)?),
        None => None,
    };
    if token.is_none() && repo.is_none() {
        return Ok(false);
    }

    let current = store.load().await?;
    let mut updated = current.clone();
    if let Some(token) = token {
        updated.github_token = Some(token.to_string());
    }
    if let Some((owner, name)) = repo {
        updated.repo_owner = Some(owner.to_string());
        updated.repo_name = Some(name.to_string());
    }

    if updated == current {
        return Ok(false);
    }
    store.save(&updated).await?;
    info!("💾 已写入 GitHub 设置");
    Ok(true)
}

fn parse_repo(value: &str) -> Result<(&str, &str)> {
    value
        .split_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'))
        .ok_or_else(|| anyhow::anyhow!("仓库格式应为 owner/name: {}", value))
}
