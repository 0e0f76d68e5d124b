//! 页面侧与协调器之间的消息
//!
//! 每条消息只有一个在途的请求/响应，通过 oneshot 回复。

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::SyncError;
use crate::models::solution::Solution;

/// 推送请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub file_name: String,
    pub code: String,
}

/// 推送结果：`{"ok": true}` 或 `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushResponse {
    Ok { ok: bool },
    Error { error: String },
}

impl PushResponse {
    pub fn ok() -> Self {
        PushResponse::Ok { ok: true }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PushResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, PushResponse::Ok { ok: true })
    }
}

impl From<Result<(), SyncError>> for PushResponse {
    fn from(result: Result<(), SyncError>) -> Self {
        match result {
            Ok(()) => PushResponse::ok(),
            Err(e) => PushResponse::error(e.to_string()),
        }
    }
}

/// 发给 `SyncCoordinator` 的消息
#[derive(Debug)]
pub enum CoordinatorMessage {
    /// 提取器产出新题解，覆盖旧值
    SolutionReady {
        solution: Solution,
        ack: oneshot::Sender<()>,
    },
    /// 读取最近一次题解
    GetLatestSolution {
        reply: oneshot::Sender<Option<Solution>>,
    },
    /// 推送到 GitHub
    PushToGithub {
        request: PushRequest,
        reply: oneshot::Sender<PushResponse>,
    },
}
