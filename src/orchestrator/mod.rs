//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (事件循环，持有 Browser)
//!     ↓
//! workflow::SubmissionFlow / workflow::run_sync
//!     ↓
//! services (检测 / 提取 / 协调 / 推送)
//!     ↓
//! infrastructure (JsExecutor) + clients (GithubClient)
//! ```

pub mod app;

pub use app::App;
