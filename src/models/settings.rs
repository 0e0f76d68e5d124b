use serde::{Deserialize, Serialize};

/// 持久化的 GitHub 设置（键值存储的形状，每个键都可能缺失）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
}

/// 完整可用的 GitHub 设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl StoredSettings {
    /// 三个键都存在且非空时才视为已配置
    pub fn complete(&self) -> Option<GithubSettings> {
        let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
        Some(GithubSettings {
            token: present(&self.github_token)?,
            owner: present(&self.repo_owner)?,
            repo: present(&self.repo_name)?,
        })
    }

    /// 非空的 token
    pub fn token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.is_empty())
    }
}
