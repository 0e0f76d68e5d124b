//! 提交检测服务 - 业务能力层
//!
//! 每个提交 id 只在页面首次显示 "Accepted" 时触发一次

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::infrastructure::PageSource;
use crate::models::SubmissionObservation;

/// 判题通过的标记文本
pub const ACCEPTED_MARKER: &str = "Accepted";

static RE_SUBMISSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"submissions/(\d+)").unwrap());
static RE_PROBLEM_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"problems/([^/]+)").unwrap());

const TITLE_SUFFIX: &str = " - LeetCode";

/// 从提交结果页路径中取出提交 id
pub fn submission_id_from_path(path: &str) -> Option<String> {
    if !path.contains("/submissions") {
        return None;
    }
    RE_SUBMISSION_ID
        .captures(path)
        .map(|caps| caps[1].to_string())
}

/// 从路径中取出题目 slug
pub fn problem_slug_from_path(path: &str) -> Option<String> {
    RE_PROBLEM_SLUG.captures(path).map(|caps| caps[1].to_string())
}

/// 从 document.title 中取出题目标题
pub fn problem_title_from_document_title(title: &str) -> Option<String> {
    if title.contains(TITLE_SUFFIX) {
        Some(title.replacen(TITLE_SUFFIX, "", 1).trim().to_string())
    } else {
        None
    }
}

/// 提交检测器
///
/// 状态只有两项：监听是否已安装、最近一次处理过的提交 id。
#[derive(Debug, Default)]
pub struct PageWatcher {
    started: bool,
    last_submission_id: Option<String>,
}

impl PageWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 安装 DOM 监听，重复调用不会重复安装
    ///
    /// 返回本次是否真正执行了安装。
    pub async fn start_observing<P: PageSource + ?Sized>(&mut self, page: &P) -> Result<bool> {
        if self.started {
            debug!("MutationObserver 已启动，跳过");
            return Ok(false);
        }
        page.install_observer().await?;
        self.started = true;
        info!("👀 MutationObserver 已启动");
        Ok(true)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn last_submission_id(&self) -> Option<&str> {
        self.last_submission_id.as_deref()
    }

    /// 处理一次 DOM 变更
    ///
    /// 仅当当前页面是一个新的提交结果页且已显示 "Accepted" 时返回 `Some`，
    /// 同时把该 id 记为已处理。页面读取失败只记录日志。
    pub async fn on_mutation<P: PageSource + ?Sized>(
        &mut self,
        page: &P,
    ) -> Option<SubmissionObservation> {
        match self.detect(page).await {
            Ok(observation) => observation,
            Err(e) => {
                warn!("检测提交状态失败: {}", e);
                None
            }
        }
    }

    async fn detect<P: PageSource + ?Sized>(
        &mut self,
        page: &P,
    ) -> Result<Option<SubmissionObservation>> {
        let location = page.location().await?;

        let Some(submission_id) = submission_id_from_path(&location.pathname) else {
            return Ok(None);
        };

        if self.last_submission_id.as_deref() == Some(submission_id.as_str()) {
            return Ok(None);
        }

        if !page.has_exact_text(ACCEPTED_MARKER).await? {
            return Ok(None);
        }

        self.last_submission_id = Some(submission_id.clone());
        info!("✅ Accepted detected (提交 #{})", submission_id);

        Ok(Some(SubmissionObservation { submission_id }))
    }
}
