//! 提交处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 检测到新的 Accepted 提交
//! 2. 重试提取语言和代码
//! 3. 组装题解并交给协调器
//! 4. 显示同步按钮
//!
//! 任何一步失败都只记录日志，不影响后续提交的检测。

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::{PageSource, SyncControl};
use crate::models::Solution;
use crate::services::{CoordinatorHandle, ExtractionState, PageWatcher, SolutionExtractor};

/// 提交处理流程
///
/// 持有检测状态，不持有任何页面资源
pub struct SubmissionFlow {
    watcher: PageWatcher,
    extractor: SolutionExtractor,
}

impl SubmissionFlow {
    pub fn new(extractor: SolutionExtractor) -> Self {
        Self {
            watcher: PageWatcher::new(),
            extractor,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(SolutionExtractor::from_config(config))
    }

    pub fn watcher(&self) -> &PageWatcher {
        &self.watcher
    }

    /// 安装 DOM 监听（幂等）
    pub async fn start<P: PageSource + ?Sized>(&mut self, page: &P) -> Result<bool> {
        self.watcher.start_observing(page).await
    }

    /// 处理一批 DOM 变更
    ///
    /// 返回本次发布的题解；没有新的 Accepted 提交时返回 `None`。
    pub async fn on_mutation<P, C>(
        &mut self,
        page: &P,
        control: &C,
        coordinator: &CoordinatorHandle,
    ) -> Option<Solution>
    where
        P: PageSource + ?Sized,
        C: SyncControl + ?Sized,
    {
        let observation = self.watcher.on_mutation(page).await?;
        debug!("开始提取提交 #{} 的代码", observation.submission_id);

        let extraction = match self.extractor.extract_with_retry(page).await {
            ExtractionState::Found(extraction) => extraction,
            _ => return None,
        };

        let location = match page.location().await {
            Ok(location) => location,
            Err(e) => {
                warn!("读取页面位置失败: {}", e);
                return None;
            }
        };

        let Some(solution) = SolutionExtractor::assemble(extraction, &location) else {
            warn!("⚠️ 路径中没有题目 slug，无法生成文件名: {}", location.pathname);
            return None;
        };
        info!("📌 Problem: {:?} ({})", solution.title, solution.slug);

        if let Err(e) = coordinator.solution_ready(solution.clone()).await {
            warn!("发布题解失败: {}", e);
            return None;
        }

        if let Err(e) = control.reveal().await {
            warn!("显示同步按钮失败: {}", e);
        }

        Some(solution)
    }

    /// 在独立任务中处理 DOM 变更
    ///
    /// 提取重试期间事件循环不被阻塞：按钮点击和退出信号照常处理。
    /// 处理期间到达的多次通知合并为一次。
    ///
    /// # 参数
    /// - `page`: 页面
    /// - `control`: 同步按钮
    /// - `coordinator`: 协调器句柄
    ///
    /// # 返回
    /// 通知句柄；句柄全部丢弃后任务结束
    pub fn spawn(
        mut self,
        page: Arc<dyn PageSource>,
        control: Arc<dyn SyncControl>,
        coordinator: CoordinatorHandle,
    ) -> DetectionHandle {
        let (tx, mut rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                self.on_mutation(page.as_ref(), control.as_ref(), &coordinator)
                    .await;
            }
            debug!("检测任务结束");
        });

        DetectionHandle { tx, task }
    }
}

/// 检测任务的通知句柄
pub struct DetectionHandle {
    tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl DetectionHandle {
    /// 通知有新的 DOM 变更，不等待处理完成
    ///
    /// 已有一次待处理的通知时直接丢弃。
    pub fn notify(&self) {
        if self.tx.try_send(()).is_err() {
            debug!("检测任务忙，合并本次变更");
        }
    }

    /// 停止任务
    pub fn abort(&self) {
        self.task.abort();
    }
}
