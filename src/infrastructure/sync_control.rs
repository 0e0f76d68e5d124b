//! 页面上的"Sync to GitHub"按钮
//!
//! 默认隐藏；题解就绪后显示，推送中禁用，结束后改写文案。

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::browser::observer::SYNC_BINDING;
use crate::infrastructure::JsExecutor;

pub const SYNC_BUTTON_ID: &str = "leetsyncgit-sync-btn";
pub const IDLE_LABEL: &str = "Sync to GitHub";
pub const BUSY_LABEL: &str = "Syncing…";
pub const SYNCED_LABEL: &str = "Synced ✅";

/// 同步按钮
#[async_trait]
pub trait SyncControl: Send + Sync {
    /// 注入按钮（隐藏状态）
    async fn install(&self) -> Result<()>;

    /// 显示按钮
    async fn reveal(&self) -> Result<()>;

    /// 推送中：禁用并改写文案
    async fn set_busy(&self) -> Result<()>;

    /// 推送成功
    async fn mark_synced(&self) -> Result<()>;

    /// 推送失败：恢复可点击，文案带上错误信息
    async fn mark_failed(&self, message: &str) -> Result<()>;
}

#[async_trait]
impl SyncControl for JsExecutor {
    async fn install(&self) -> Result<()> {
        debug!("注入同步按钮");
        self.eval_persistent(install_script()).await
    }

    async fn reveal(&self) -> Result<()> {
        self.eval(with_button(r#"btn.style.display = "block";"#)).await?;
        Ok(())
    }

    async fn set_busy(&self) -> Result<()> {
        let body = format!(
            r#"btn.disabled = true; btn.textContent = {}; btn.style.opacity = "0.7";"#,
            serde_json::to_string(BUSY_LABEL)?
        );
        self.eval(with_button(&body)).await?;
        Ok(())
    }

    async fn mark_synced(&self) -> Result<()> {
        let body = format!(
            r##"btn.textContent = {}; btn.style.opacity = "1"; btn.style.backgroundColor = "#6e7681";"##,
            serde_json::to_string(SYNCED_LABEL)?
        );
        self.eval(with_button(&body)).await?;
        Ok(())
    }

    async fn mark_failed(&self, message: &str) -> Result<()> {
        let body = format!(
            r#"btn.disabled = false; btn.textContent = {}; btn.title = {}; btn.style.opacity = "1";"#,
            serde_json::to_string(&failure_label(message))?,
            serde_json::to_string(message)?
        );
        self.eval(with_button(&body)).await?;
        Ok(())
    }
}

/// 失败时的按钮文案
pub fn failure_label(message: &str) -> String {
    format!("Sync failed: {} (retry)", message)
}

/// 找到按钮后执行 `body`，按钮不存在时什么也不做
fn with_button(body: &str) -> String {
    format!(
        r#"
        (() => {{
            const btn = document.getElementById("{id}");
            if (!btn) return {{ found: false }};
            {body}
            return {{ found: true }};
        }})()
        "#,
        id = SYNC_BUTTON_ID,
        body = body
    )
}

fn install_script() -> String {
    format!(
        r##"
        (() => {{
            const create = () => {{
                if (!document.body || document.getElementById("{id}")) return;
                const btn = document.createElement("button");
                btn.id = "{id}";
                btn.textContent = "{label}";
                Object.assign(btn.style, {{
                    position: "fixed",
                    bottom: "24px",
                    right: "24px",
                    zIndex: "9999",
                    padding: "10px 14px",
                    borderRadius: "8px",
                    border: "none",
                    cursor: "pointer",
                    fontSize: "14px",
                    fontWeight: "600",
                    backgroundColor: "#2ea44f",
                    color: "#ffffff",
                    boxShadow: "0 4px 12px rgba(0,0,0,0.15)",
                    display: "none"
                }});
                btn.addEventListener("click", () => {{
                    if (btn.disabled || typeof window.{binding} !== "function") return;
                    // 先在页面内禁用，避免连续点击触发多次推送
                    btn.disabled = true;
                    window.{binding}("");
                }});
                document.body.appendChild(btn);
            }};
            if (document.body) create();
            else document.addEventListener("DOMContentLoaded", create, {{ once: true }});
            return {{ installed: true }};
        }})()
        "##,
        id = SYNC_BUTTON_ID,
        label = IDLE_LABEL,
        binding = SYNC_BINDING
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_script_is_hidden_and_wired() {
        let script = install_script();
        assert!(script.contains(r#"display: "none""#));
        assert!(script.contains(SYNC_BINDING));
        assert!(script.contains(SYNC_BUTTON_ID));
    }

    #[test]
    fn test_click_disables_button_before_calling_binding() {
        let script = install_script();
        let disable = script.find("btn.disabled = true;").unwrap();
        let call = script.find(&format!("window.{}(\"\")", SYNC_BINDING)).unwrap();
        assert!(disable < call);
    }

    #[test]
    fn test_failure_label_carries_message() {
        assert_eq!(
            failure_label("sha mismatch"),
            "Sync failed: sha mismatch (retry)"
        );
    }
}
