//! 测试用的内存实现：页面、同步按钮、GitHub API、设置存储
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use leetsync::clients::{ApiResponse, ContentsApi, IdentityApi, PutContentsBody, RepoSummary};
use leetsync::error::{SyncError, SyncResult};
use leetsync::infrastructure::{PageSource, SyncControl};
use leetsync::models::{PageLocation, RemoteFileTarget, StoredSettings};
use leetsync::services::{SettingsStore, SolutionExtractor, SolutionUploader, SyncCoordinator};
use leetsync::services::CoordinatorHandle;

// ========== 页面 ==========

#[derive(Debug, Default)]
struct PageState {
    pathname: String,
    title: Option<String>,
    accepted: bool,
    language: Option<String>,
    code: Option<String>,
    /// 前 N 次提取时语言/代码面板尚未渲染
    hidden_attempts: usize,
    language_reads: usize,
}

/// 可编程的页面
#[derive(Default)]
pub struct FakePage {
    state: Mutex<PageState>,
    pub installs: AtomicUsize,
    pub marker_checks: AtomicUsize,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&self, pathname: &str, title: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.pathname = pathname.to_string();
        state.title = title.map(String::from);
        state.accepted = false;
    }

    pub fn set_accepted(&self, accepted: bool) {
        self.state.lock().unwrap().accepted = accepted;
    }

    pub fn set_panels(&self, language: &str, code: &str) {
        let mut state = self.state.lock().unwrap();
        state.language = Some(language.to_string());
        state.code = Some(code.to_string());
        state.language_reads = 0;
    }

    pub fn hide_panels_for(&self, attempts: usize) {
        self.state.lock().unwrap().hidden_attempts = attempts;
    }

    pub fn extraction_attempts(&self) -> usize {
        self.state.lock().unwrap().language_reads
    }

    /// 一个已判题通过、面板已渲染的提交结果页
    pub fn accepted_submission(slug: &str, id: &str, language: &str, code: &str) -> Self {
        let page = Self::new();
        page.navigate(
            &format!("/problems/{}/submissions/{}/", slug, id),
            Some("Two Sum - LeetCode"),
        );
        page.set_accepted(true);
        page.set_panels(language, code);
        page
    }
}

#[async_trait]
impl PageSource for FakePage {
    async fn install_observer(&self) -> Result<()> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn location(&self) -> Result<PageLocation> {
        let state = self.state.lock().unwrap();
        Ok(PageLocation {
            pathname: state.pathname.clone(),
            title: state.title.clone(),
        })
    }

    async fn has_exact_text(&self, marker: &str) -> Result<bool> {
        self.marker_checks.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(marker == "Accepted" && state.accepted)
    }

    async fn find_exact_text(&self, candidates: &[&str]) -> Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        state.language_reads += 1;
        if state.language_reads <= state.hidden_attempts {
            return Ok(None);
        }
        Ok(state
            .language
            .clone()
            .filter(|language| candidates.contains(&language.as_str())))
    }

    async fn code_block_text(&self) -> Result<Option<String>> {
        let state = self.state.lock().unwrap();
        if state.language_reads <= state.hidden_attempts {
            return Ok(None);
        }
        Ok(state.code.clone())
    }
}

// ========== 同步按钮 ==========

/// 记录所有按钮操作
#[derive(Default)]
pub struct FakeControl {
    pub calls: Mutex<Vec<String>>,
}

impl FakeControl {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl SyncControl for FakeControl {
    async fn install(&self) -> Result<()> {
        self.record("install");
        Ok(())
    }

    async fn reveal(&self) -> Result<()> {
        self.record("reveal");
        Ok(())
    }

    async fn set_busy(&self) -> Result<()> {
        self.record("busy");
        Ok(())
    }

    async fn mark_synced(&self) -> Result<()> {
        self.record("synced");
        Ok(())
    }

    async fn mark_failed(&self, message: &str) -> Result<()> {
        self.record(format!("failed: {}", message));
        Ok(())
    }
}

// ========== GitHub contents API ==========

/// 可编程的 contents API，记录每次请求
pub struct FakeContentsApi {
    get_result: Mutex<SyncResult<ApiResponse>>,
    put_result: Mutex<SyncResult<ApiResponse>>,
    pub gets: Mutex<Vec<RemoteFileTarget>>,
    pub puts: Mutex<Vec<(String, RemoteFileTarget, PutContentsBody)>>,
}

impl FakeContentsApi {
    /// 文件不存在、写入成功
    pub fn new() -> Self {
        Self {
            get_result: Mutex::new(Ok(response(404, json!({ "message": "Not Found" })))),
            put_result: Mutex::new(Ok(response(201, json!({ "content": { "name": "x" } })))),
            gets: Mutex::new(Vec::new()),
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_get(self, result: SyncResult<ApiResponse>) -> Self {
        *self.get_result.lock().unwrap() = result;
        self
    }

    pub fn with_put(self, result: SyncResult<ApiResponse>) -> Self {
        *self.put_result.lock().unwrap() = result;
        self
    }

    pub fn request_count(&self) -> usize {
        self.gets.lock().unwrap().len() + self.puts.lock().unwrap().len()
    }

    pub fn last_put(&self) -> Option<(String, RemoteFileTarget, PutContentsBody)> {
        self.puts.lock().unwrap().last().cloned()
    }
}

pub fn response(status: u16, body: serde_json::Value) -> ApiResponse {
    ApiResponse { status, body }
}

#[async_trait]
impl ContentsApi for FakeContentsApi {
    async fn get_contents(&self, _token: &str, target: &RemoteFileTarget) -> SyncResult<ApiResponse> {
        self.gets.lock().unwrap().push(target.clone());
        self.get_result.lock().unwrap().clone()
    }

    async fn put_contents(
        &self,
        token: &str,
        target: &RemoteFileTarget,
        body: &PutContentsBody,
    ) -> SyncResult<ApiResponse> {
        self.puts
            .lock()
            .unwrap()
            .push((token.to_string(), target.clone(), body.clone()));
        self.put_result.lock().unwrap().clone()
    }
}

// ========== 身份 API ==========

pub struct FakeIdentityApi {
    pub user: SyncResult<ApiResponse>,
    pub repos: Vec<RepoSummary>,
}

#[async_trait]
impl IdentityApi for FakeIdentityApi {
    async fn current_user(&self, _token: &str) -> SyncResult<ApiResponse> {
        self.user.clone()
    }

    async fn list_repos(&self, _token: &str) -> SyncResult<Vec<RepoSummary>> {
        Ok(self.repos.clone())
    }
}

// ========== 设置存储 ==========

#[derive(Default)]
pub struct MemorySettingsStore {
    settings: Mutex<StoredSettings>,
    pub loads: AtomicUsize,
}

impl MemorySettingsStore {
    pub fn new(settings: StoredSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn configured() -> Self {
        Self::new(configured_settings())
    }

    pub fn current(&self) -> StoredSettings {
        self.settings.lock().unwrap().clone()
    }
}

pub fn configured_settings() -> StoredSettings {
    StoredSettings {
        github_token: Some("ghp_test".into()),
        repo_owner: Some("octo".into()),
        repo_name: Some("leetcode".into()),
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<StoredSettings> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.current())
    }

    async fn save(&self, settings: &StoredSettings) -> Result<()> {
        *self.settings.lock().unwrap() = settings.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.settings.lock().unwrap() = StoredSettings::default();
        Ok(())
    }
}

// ========== 组装 ==========

pub fn fast_extractor(max_attempts: u32) -> SolutionExtractor {
    SolutionExtractor::new(max_attempts, Duration::from_millis(1))
}

pub fn spawn_coordinator(
    api: Arc<FakeContentsApi>,
    store: Arc<MemorySettingsStore>,
) -> CoordinatorHandle {
    SyncCoordinator::spawn(Arc::new(SolutionUploader::new(api, store)))
}

pub fn remote_error(message: &str) -> SyncError {
    SyncError::Remote {
        message: message.to_string(),
    }
}
