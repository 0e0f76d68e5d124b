//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：连接浏览器、创建 JsExecutor、检查 GitHub 设置、启动协调器
//! 2. **事件循环**：合并页面事件，DOM 变更交给 `SubmissionFlow`，按钮点击交给 `run_sync`
//! 3. **资源管理**：唯一持有 Browser 的模块
//!
//! 检测和同步都在独立任务中执行，事件循环只负责分发，
//! 提取重试或推送期间仍能响应按钮点击和退出信号。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chromiumoxide::Browser;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::browser::{self, observer};
use crate::clients::GithubClient;
use crate::config::Config;
use crate::infrastructure::{JsExecutor, SyncControl};
use crate::services::{
    check_settings, import_settings, CoordinatorHandle, SolutionUploader, SyncCoordinator,
    TomlSettingsStore,
};
use crate::utils::logging::log_startup;
use crate::workflow::{run_sync, SubmissionFlow};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
    coordinator: CoordinatorHandle,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(config.browser_debug_port, &config.settings_file);

        let github = Arc::new(GithubClient::new(&config)?);
        let store = Arc::new(TomlSettingsStore::new(&config.settings_file));

        import_settings(
            store.as_ref(),
            config.github_token.as_deref(),
            config.github_repo.as_deref(),
        )
        .await?;

        match check_settings(github.as_ref(), store.as_ref()).await {
            Ok(status) => info!("GitHub 设置状态: {:?}", status),
            Err(e) => warn!("⚠️ 无法校验 GitHub 设置，继续监听: {}", e),
        }

        let uploader = Arc::new(SolutionUploader::new(github, store));
        let coordinator = SyncCoordinator::spawn(uploader);

        // 连接浏览器
        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            &config.target_url,
            config.target_title.as_deref(),
        )
        .await?;

        Ok(Self {
            config,
            _browser: browser,
            executor: JsExecutor::new(page),
            coordinator,
        })
    }

    /// 运行事件循环，直到页面关闭或收到 Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let mut events = observer::register_bindings(self.executor.page()).await?;

        self.executor.install().await?;

        // 等待 SPA 挂载后再开始监听
        sleep(Duration::from_millis(self.config.observe_start_delay_ms)).await;

        let mut flow = SubmissionFlow::from_config(&self.config);
        flow.start(&self.executor).await?;
        let page = Arc::new(self.executor.clone());
        let detection = flow.spawn(page.clone(), page, self.coordinator.clone());
        info!("等待 Accepted 提交...");

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                batch = observer::next_batch(&mut events) => {
                    let Some(batch) = batch else {
                        warn!("页面事件流已关闭，程序结束");
                        break;
                    };

                    if batch.mutations > 0 {
                        detection.notify();
                    }

                    if batch.sync_requests > 0 {
                        self.spawn_sync();
                    }
                }
                _ = &mut ctrl_c => {
                    info!("收到退出信号，程序结束");
                    break;
                }
            }
        }

        detection.abort();
        Ok(())
    }

    fn spawn_sync(&self) {
        let executor = self.executor.clone();
        let coordinator = self.coordinator.clone();
        tokio::spawn(async move {
            run_sync(&executor, &coordinator).await;
        });
    }
}
