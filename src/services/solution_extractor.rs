//! 题解提取服务 - 业务能力层
//!
//! 语言标签和代码面板在 "Accepted" 出现后才异步渲染，
//! 因此提取是一个有界重试的状态机：Searching → Found / TimedOut。

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::PageSource;
use crate::models::{PageLocation, Solution, DETECTABLE_LANGUAGES};
use crate::services::page_watcher::{problem_slug_from_path, problem_title_from_document_title};
use crate::utils::logging::truncate_text;

/// 行首的行号：空白 + 数字 + 至多一个空白
static RE_LINE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[0-9]+\s?").unwrap());

/// 去掉页面渲染时在每行前插入的行号
///
/// 每行只去掉第一段匹配，其余内容（包括缩进）原样保留。
pub fn normalize_code(raw: &str) -> String {
    raw.split('\n')
        .map(|line| RE_LINE_NUMBER.replace(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 一次成功提取的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub language: String,
    pub code: String,
}

/// 提取状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionState {
    /// 正在查找，`attempt` 为已完成的尝试次数
    Searching { attempt: u32 },
    Found(Extraction),
    TimedOut { attempts: u32 },
}

impl ExtractionState {
    pub fn start() -> Self {
        ExtractionState::Searching { attempt: 0 }
    }

    /// 根据一次尝试的结果推进状态；终态不再变化
    pub fn advance(self, result: Option<Extraction>, max_attempts: u32) -> Self {
        match self {
            ExtractionState::Searching { attempt } => {
                let attempt = attempt + 1;
                match result {
                    Some(extraction) => ExtractionState::Found(extraction),
                    None if attempt >= max_attempts => ExtractionState::TimedOut { attempts: attempt },
                    None => ExtractionState::Searching { attempt },
                }
            }
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExtractionState::Searching { .. })
    }
}

/// 题解提取服务
pub struct SolutionExtractor {
    max_attempts: u32,
    delay: Duration,
}

impl SolutionExtractor {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.extract_max_attempts,
            Duration::from_millis(config.extract_retry_delay_ms),
        )
    }

    /// 尝试一次：语言标签和代码容器都存在才算成功
    ///
    /// 页面读取失败与元素缺失一样返回 `None`。
    pub async fn extract_once<P: PageSource + ?Sized>(&self, page: &P) -> Option<Extraction> {
        let language = match page.find_exact_text(DETECTABLE_LANGUAGES).await {
            Ok(Some(language)) => language,
            Ok(None) => return None,
            Err(e) => {
                debug!("读取语言标签失败: {}", e);
                return None;
            }
        };

        let raw_code = match page.code_block_text().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!("读取代码失败: {}", e);
                return None;
            }
        };

        let code = normalize_code(&raw_code);
        if language.is_empty() || code.is_empty() {
            return None;
        }

        Some(Extraction { language, code })
    }

    /// 有界重试，直到找到或用完尝试次数
    ///
    /// # 参数
    /// - `page`: 已出现 Accepted 标记的页面
    ///
    /// # 返回
    /// `Found` 或 `TimedOut`，超时只记录日志
    pub async fn extract_with_retry<P: PageSource + ?Sized>(&self, page: &P) -> ExtractionState {
        let mut state = ExtractionState::start();

        loop {
            let result = self.extract_once(page).await;
            state = state.advance(result, self.max_attempts);

            match &state {
                ExtractionState::Searching { attempt } => {
                    debug!(
                        "代码面板尚未就绪 (尝试 {}/{})，{}ms 后重试",
                        attempt,
                        self.max_attempts,
                        self.delay.as_millis()
                    );
                    sleep(self.delay).await;
                }
                ExtractionState::Found(extraction) => {
                    info!("📝 Language: {}", extraction.language);
                    debug!("代码预览: {}", truncate_text(&extraction.code, 200));
                    return state;
                }
                ExtractionState::TimedOut { attempts } => {
                    warn!("⚠️ Failed to extract code from DOM ({} 次尝试)", attempts);
                    return state;
                }
            }
        }
    }

    /// 补上标题和 slug，组装完整题解
    ///
    /// 路径里没有 slug 时无法生成文件名，返回 `None`。
    pub fn assemble(extraction: Extraction, location: &PageLocation) -> Option<Solution> {
        let slug = problem_slug_from_path(&location.pathname)?;
        let title = location
            .title
            .as_deref()
            .and_then(problem_title_from_document_title);

        Some(Solution {
            title,
            slug,
            language: extraction.language,
            code: extraction.code,
        })
    }
}
