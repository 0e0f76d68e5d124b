//! 错误类型
//!
//! DOM 一侧（检测、提取）的错误只记录日志，不会出现在这里；
//! 这里只描述需要同步返回给调用方（同步按钮）的错误。

use thiserror::Error;

/// 同步到 GitHub 时的错误
///
/// `Display` 的内容就是展示给用户的文案，远端返回的 message 原样透传。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// token / owner / repo 缺失，不会发起任何网络请求
    #[error("GitHub not configured")]
    NotConfigured,

    /// 语言没有对应的文件扩展名
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// 写入时 sha 已过期（HTTP 409）
    #[error("{message}")]
    RemoteWriteConflict { message: String },

    /// 其他非成功的写入响应
    #[error("{message}")]
    Remote { message: String },

    /// 网络不可达、响应无法解析等
    #[error("{0}")]
    Transport(String),

    /// 本地配置无法读取
    #[error("failed to read settings: {0}")]
    Storage(String),
}

impl SyncError {
    /// 远端未给出 message 时使用的通用文案
    pub const GENERIC_PUSH_FAILURE: &'static str = "GitHub push failed";
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Transport(e.to_string())
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
