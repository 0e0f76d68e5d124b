//! 同步协调器
//!
//! 以 actor 的形式独占"最近一次题解"，外部只能通过消息读写：
//! - `SolutionReady` 覆盖旧值（只保留最新一份）
//! - `GetLatestSolution` 读取当前值
//! - `PushToGithub` 在独立任务中推送，推送期间读写不受阻塞

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};
use crate::models::{extension_for, CoordinatorMessage, PushRequest, PushResponse, Solution};
use crate::services::uploader::SolutionUploader;

const CHANNEL_CAPACITY: usize = 16;

/// 由语言映射得到文件名：`slug + 扩展名`
pub fn resolve_file_name(solution: &Solution) -> SyncResult<String> {
    let ext = extension_for(&solution.language)
        .ok_or_else(|| SyncError::UnsupportedLanguage(solution.language.clone()))?;
    Ok(format!("{}{}", solution.slug, ext))
}

/// 协调器 actor
pub struct SyncCoordinator {
    latest: Option<Solution>,
    uploader: Arc<SolutionUploader>,
    rx: mpsc::Receiver<CoordinatorMessage>,
}

impl SyncCoordinator {
    /// 启动 actor，返回可克隆的句柄
    ///
    /// 所有句柄都被丢弃后 actor 自动退出。
    pub fn spawn(uploader: Arc<SolutionUploader>) -> CoordinatorHandle {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let actor = Self {
            latest: None,
            uploader,
            rx,
        };
        tokio::spawn(actor.run());
        CoordinatorHandle { tx }
    }

    async fn run(mut self) {
        while let Some(message) = self.rx.recv().await {
            self.handle(message);
        }
        debug!("SyncCoordinator 已停止");
    }

    fn handle(&mut self, message: CoordinatorMessage) {
        match message {
            CoordinatorMessage::SolutionReady { solution, ack } => {
                info!("💾 Solution stored: {}", solution);
                self.latest = Some(solution);
                let _ = ack.send(());
            }
            CoordinatorMessage::GetLatestSolution { reply } => {
                let _ = reply.send(self.latest.clone());
            }
            CoordinatorMessage::PushToGithub { request, reply } => {
                let uploader = Arc::clone(&self.uploader);
                tokio::spawn(async move {
                    let response = PushResponse::from(uploader.push(&request).await);
                    let _ = reply.send(response);
                });
            }
        }
    }
}

/// 协调器句柄
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<CoordinatorMessage>,
}

impl CoordinatorHandle {
    /// 发布新题解，等待 actor 确认写入
    pub async fn solution_ready(&self, solution: Solution) -> anyhow::Result<()> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(CoordinatorMessage::SolutionReady { solution, ack })
            .await
            .map_err(|_| anyhow::anyhow!("SyncCoordinator 已停止"))?;
        done.await
            .map_err(|_| anyhow::anyhow!("SyncCoordinator 未确认写入"))?;
        Ok(())
    }

    /// 读取最近一次题解；actor 已停止时返回 `None`
    pub async fn get_latest(&self) -> Option<Solution> {
        let (reply, rx) = oneshot::channel();
        if self
            .tx
            .send(CoordinatorMessage::GetLatestSolution { reply })
            .await
            .is_err()
        {
            warn!("SyncCoordinator 已停止，无法读取题解");
            return None;
        }
        rx.await.ok().flatten()
    }

    /// 推送，直到得到成功或失败的结果
    pub async fn push(&self, request: PushRequest) -> PushResponse {
        let (reply, rx) = oneshot::channel();
        if self
            .tx
            .send(CoordinatorMessage::PushToGithub { request, reply })
            .await
            .is_err()
        {
            return PushResponse::error("sync coordinator stopped");
        }
        rx.await
            .unwrap_or_else(|_| PushResponse::error("sync coordinator dropped the request"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(language: &str) -> Solution {
        Solution {
            title: Some("Two Sum".into()),
            slug: "two-sum".into(),
            language: language.into(),
            code: "pass".into(),
        }
    }

    #[test]
    fn test_resolve_file_name_for_known_languages() {
        let cases = [
            ("Python3", "two-sum.py"),
            ("Python", "two-sum.py"),
            ("C++", "two-sum.cpp"),
            ("C", "two-sum.c"),
            ("C#", "two-sum.cs"),
            ("Java", "two-sum.java"),
            ("JavaScript", "two-sum.js"),
            ("TypeScript", "two-sum.ts"),
            ("Go", "two-sum.go"),
            ("Rust", "two-sum.rs"),
            ("Kotlin", "two-sum.kt"),
        ];
        for (language, expected) in cases {
            assert_eq!(resolve_file_name(&solution(language)).unwrap(), expected);
        }
    }

    #[test]
    fn test_resolve_file_name_unsupported() {
        assert_eq!(
            resolve_file_name(&solution("Ruby")),
            Err(SyncError::UnsupportedLanguage("Ruby".into()))
        );
    }
}
