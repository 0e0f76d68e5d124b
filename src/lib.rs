//! # LeetSync
//!
//! 监听 LeetCode 页面上的 Accepted 提交，提取题解代码并推送到 GitHub 仓库
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，实现 `PageSource` / `SyncControl`
//!
//! ### ② 业务能力层（Services）
//! - `PageWatcher` - 每个提交 id 只检测一次 Accepted
//! - `SolutionExtractor` - 有界重试提取语言与代码，去掉行号
//! - `SyncCoordinator` - 独占最近一次题解的 actor
//! - `SolutionUploader` - 先检查后写入的 upsert
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionFlow` - 检测 → 提取 → 发布 → 显示按钮
//! - `run_sync` - 按钮 → 读取题解 → 文件名 → 推送 → 改写按钮
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 连接浏览器、事件循环

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{SyncError, SyncResult};
pub use infrastructure::JsExecutor;
pub use models::Solution;
pub use orchestrator::App;
pub use workflow::{run_sync, SubmissionFlow, SyncOutcome};
