//! 同步流程 - 流程层
//!
//! 按钮点击 → 读取最新题解 → 解析文件名 → 推送 → 改写按钮

use tracing::{info, warn};

use crate::error::SyncError;
use crate::infrastructure::SyncControl;
use crate::models::{PushRequest, PushResponse};
use crate::services::{resolve_file_name, CoordinatorHandle};

pub const NO_SOLUTION_MESSAGE: &str = "No Accepted solution found";

/// 同步结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced { file_name: String },
    Failed { message: String },
}

/// 执行一次同步
///
/// 推送开始后不会被取消，直到得到成功或失败的结果。
pub async fn run_sync<C: SyncControl + ?Sized>(
    control: &C,
    coordinator: &CoordinatorHandle,
) -> SyncOutcome {
    if let Err(e) = control.set_busy().await {
        warn!("更新按钮状态失败: {}", e);
    }

    let outcome = sync_latest(coordinator).await;

    let result = match &outcome {
        SyncOutcome::Synced { file_name } => {
            info!("✅ Solution pushed to GitHub: {}", file_name);
            control.mark_synced().await
        }
        SyncOutcome::Failed { message } => {
            warn!("❌ GitHub sync failed: {}", message);
            control.mark_failed(message).await
        }
    };
    if let Err(e) = result {
        warn!("更新按钮状态失败: {}", e);
    }

    outcome
}

async fn sync_latest(coordinator: &CoordinatorHandle) -> SyncOutcome {
    let Some(solution) = coordinator.get_latest().await else {
        return SyncOutcome::Failed {
            message: NO_SOLUTION_MESSAGE.to_string(),
        };
    };

    let file_name = match resolve_file_name(&solution) {
        Ok(file_name) => file_name,
        Err(e) => {
            return SyncOutcome::Failed {
                message: e.to_string(),
            }
        }
    };
    info!("🔄 Syncing: {}", file_name);

    let request = PushRequest {
        file_name: file_name.clone(),
        code: solution.code,
    };

    match coordinator.push(request).await {
        PushResponse::Error { error } => SyncOutcome::Failed { message: error },
        response if response.is_ok() => SyncOutcome::Synced { file_name },
        _ => SyncOutcome::Failed {
            message: SyncError::GENERIC_PUSH_FAILURE.to_string(),
        },
    }
}
