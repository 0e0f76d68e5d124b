//! 基础设施层
//!
//! 持有稀缺资源（Page），只向上暴露能力：
//! - `PageSource` - 读取页面状态、安装 DOM 监听
//! - `SyncControl` - 操作注入到页面上的同步按钮

pub mod js_executor;
pub mod page_source;
pub mod sync_control;

pub use js_executor::JsExecutor;
pub use page_source::PageSource;
pub use sync_control::SyncControl;
