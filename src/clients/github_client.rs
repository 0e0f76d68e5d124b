/// GitHub API 客户端
///
/// 封装 contents API（读 sha / 写文件）以及 token 校验、仓库列表
use crate::config::Config;
use crate::error::{SyncError, SyncResult};
use crate::models::RemoteFileTarget;
use anyhow::Context;
use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("leetsync/", env!("CARGO_PKG_VERSION"));

/// 一次 API 调用的原始结果
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 响应体中的 `sha` 字段
    pub fn sha(&self) -> Option<&str> {
        self.body.get("sha").and_then(|v| v.as_str())
    }

    /// 响应体中的 `message` 字段
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|v| v.as_str())
    }
}

/// PUT contents 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutContentsBody {
    pub message: String,
    /// UTF-8 字节的 base64
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl PutContentsBody {
    pub fn new(file_name: &str, code: &str, sha: Option<String>) -> Self {
        Self {
            message: format!("Add solution: {}", file_name),
            content: base64::engine::general_purpose::STANDARD.encode(code.as_bytes()),
            sha,
        }
    }
}

/// 仓库 contents API
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// GET /repos/{owner}/{repo}/contents/{path}
    async fn get_contents(&self, token: &str, target: &RemoteFileTarget) -> SyncResult<ApiResponse>;

    /// PUT /repos/{owner}/{repo}/contents/{path}
    async fn put_contents(
        &self,
        token: &str,
        target: &RemoteFileTarget,
        body: &PutContentsBody,
    ) -> SyncResult<ApiResponse>;
}

/// 当前用户
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// 仓库列表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub owner: RepoOwner,
}

impl RepoSummary {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// 身份与仓库列表 API
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// GET /user
    async fn current_user(&self, token: &str) -> SyncResult<ApiResponse>;

    /// GET /user/repos?per_page=100
    async fn list_repos(&self, token: &str) -> SyncResult<Vec<RepoSummary>>;
}

/// 基于 reqwest 的 GitHub 客户端
pub struct GithubClient {
    http: reqwest::Client,
    api_base_url: String,
}

impl GithubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_base_url(&config.github_api_base_url)
    }

    pub fn with_base_url(api_base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("无法创建 HTTP 客户端")?;
        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn contents_url(&self, target: &RemoteFileTarget) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base_url, target.owner, target.repo, target.file_name
        )
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, GITHUB_ACCEPT)
    }

    /// 发送请求；非 JSON 的响应体记为 null
    async fn send(&self, request: RequestBuilder) -> SyncResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl ContentsApi for GithubClient {
    async fn get_contents(&self, token: &str, target: &RemoteFileTarget) -> SyncResult<ApiResponse> {
        let url = self.contents_url(target);
        debug!("GET {}", url);
        self.send(self.authorized(self.http.get(&url), token)).await
    }

    async fn put_contents(
        &self,
        token: &str,
        target: &RemoteFileTarget,
        body: &PutContentsBody,
    ) -> SyncResult<ApiResponse> {
        let url = self.contents_url(target);
        debug!("PUT {} (sha: {:?})", url, body.sha);
        self.send(self.authorized(self.http.put(&url), token).json(body))
            .await
    }
}

#[async_trait]
impl IdentityApi for GithubClient {
    async fn current_user(&self, token: &str) -> SyncResult<ApiResponse> {
        let url = format!("{}/user", self.api_base_url);
        self.send(self.authorized(self.http.get(&url), token)).await
    }

    async fn list_repos(&self, token: &str) -> SyncResult<Vec<RepoSummary>> {
        let url = format!("{}/user/repos", self.api_base_url);
        let response = self
            .send(
                self.authorized(self.http.get(&url), token)
                    .query(&[("per_page", "100")]),
            )
            .await?;

        if !response.is_success() {
            return Err(SyncError::Remote {
                message: response
                    .message()
                    .unwrap_or("REPO_LIST_FAILED")
                    .to_string(),
            });
        }

        serde_json::from_value(response.body).map_err(|e| SyncError::Transport(e.to_string()))
    }
}
