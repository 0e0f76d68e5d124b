//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"的能力

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::browser::observer::MUTATION_BINDING;
use crate::infrastructure::PageSource;
use crate::models::PageLocation;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 实现 `PageSource` / `SyncControl`，不关心 Solution 的处理流程
#[derive(Clone)]
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    ///
    /// # 参数
    /// - `js_code`: 要执行的 JavaScript 代码
    ///
    /// # 返回
    /// 返回 JSON 值
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    ///
    /// # 参数
    /// - `js_code`: 要执行的 JavaScript 代码
    ///
    /// # 返回
    /// 返回反序列化后的类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 立即执行脚本，并在之后每个新文档加载时重新执行
    pub async fn eval_persistent(&self, script: String) -> Result<()> {
        self.page
            .execute(AddScriptToEvaluateOnNewDocumentParams::new(script.clone()))
            .await
            .context("无法注册新文档脚本")?;
        self.eval(script).await?;
        Ok(())
    }
}

/// 脚本统一返回对象，避免 null 结果取不到值
#[derive(Debug, Deserialize)]
struct TextProbe {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarkerProbe {
    found: bool,
}

#[async_trait]
impl PageSource for JsExecutor {
    async fn install_observer(&self) -> Result<()> {
        debug!("安装 MutationObserver");
        self.eval_persistent(observer_script()).await
    }

    async fn location(&self) -> Result<PageLocation> {
        self.eval_as(r#"({ pathname: window.location.pathname, title: document.title || null })"#)
            .await
            .context("无法读取页面位置")
    }

    async fn has_exact_text(&self, marker: &str) -> Result<bool> {
        let script = format!(
            r#"
            (() => {{
                const marker = {};
                const found = Array.from(document.querySelectorAll("span, div"))
                    .some(el => el.textContent?.trim() === marker);
                return {{ found }};
            }})()
            "#,
            serde_json::to_string(marker)?
        );
        let probe: MarkerProbe = self.eval_as(script).await?;
        Ok(probe.found)
    }

    async fn find_exact_text(&self, candidates: &[&str]) -> Result<Option<String>> {
        let script = format!(
            r#"
            (() => {{
                const labels = new Set({});
                const el = Array.from(document.querySelectorAll("span, div"))
                    .find(el => el.textContent && labels.has(el.textContent.trim()));
                return {{ text: el ? el.textContent.trim() : null }};
            }})()
            "#,
            serde_json::to_string(candidates)?
        );
        let probe: TextProbe = self.eval_as(script).await?;
        Ok(probe.text)
    }

    async fn code_block_text(&self) -> Result<Option<String>> {
        let probe: TextProbe = self
            .eval_as(
                r#"
                (() => {
                    const node = document.querySelector("pre code");
                    return { text: node ? node.textContent : null };
                })()
                "#,
            )
            .await?;
        Ok(probe.text)
    }
}

/// 页面侧的 DOM 监听脚本
///
/// 每次变更调用一次 runtime binding；同一文档只安装一次。
fn observer_script() -> String {
    format!(
        r#"
        (() => {{
            const start = () => {{
                if (window.__leetsyncObserverStarted || !document.body) return false;
                window.__leetsyncObserverStarted = true;
                const observer = new MutationObserver(() => {{
                    if (typeof window.{binding} === "function") window.{binding}("");
                }});
                observer.observe(document.body, {{ childList: true, subtree: true }});
                return true;
            }};
            if (!start() && !window.__leetsyncObserverStarted) {{
                document.addEventListener("DOMContentLoaded", start, {{ once: true }});
            }}
            return {{ started: !!window.__leetsyncObserverStarted }};
        }})()
        "#,
        binding = MUTATION_BINDING
    )
}
