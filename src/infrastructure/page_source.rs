use anyhow::Result;
use async_trait::async_trait;

use crate::models::PageLocation;

/// 页面状态的只读视图
///
/// 元素缺失不是错误：查不到时返回 `false` / `None`。
/// `Err` 只表示与页面的通信本身失败。
#[async_trait]
pub trait PageSource: Send + Sync {
    /// 在页面上安装整棵子树的 DOM 变更监听
    async fn install_observer(&self) -> Result<()>;

    /// 当前路径与文档标题
    async fn location(&self) -> Result<PageLocation>;

    /// 是否存在 trim 后与 `marker` 完全相同的文本节点
    async fn has_exact_text(&self, marker: &str) -> Result<bool>;

    /// 第一个 trim 后与候选项之一完全相同的文本
    async fn find_exact_text(&self, candidates: &[&str]) -> Result<Option<String>>;

    /// 代码容器的原始文本
    async fn code_block_text(&self) -> Result<Option<String>>;
}
