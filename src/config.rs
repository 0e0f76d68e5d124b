/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 找不到目标页面时打开的 URL
    pub target_url: String,
    /// 用于匹配已打开页面的标题片段
    pub target_title: Option<String>,
    /// 页面挂载后延迟多久开始监听 DOM（毫秒）
    pub observe_start_delay_ms: u64,
    /// 提取代码的最大尝试次数
    pub extract_max_attempts: u32,
    /// 两次提取之间的间隔（毫秒）
    pub extract_retry_delay_ms: u64,
    // --- GitHub 配置 ---
    pub github_api_base_url: String,
    /// 保存 token / owner / repo 的 TOML 文件
    pub settings_file: String,
    /// 启动时写入设置文件的 token
    pub github_token: Option<String>,
    /// 启动时写入设置文件的仓库（`owner/name`）
    pub github_repo: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "https://leetcode.com/problemset/".to_string(),
            target_title: Some("LeetCode".to_string()),
            observe_start_delay_ms: 1500,
            extract_max_attempts: 11,
            extract_retry_delay_ms: 500,
            github_api_base_url: "https://api.github.com".to_string(),
            settings_file: "leetsync.toml".to_string(),
            github_token: None,
            github_repo: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            target_title: std::env::var("TARGET_TITLE").ok().or(default.target_title),
            observe_start_delay_ms: std::env::var("OBSERVE_START_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.observe_start_delay_ms),
            extract_max_attempts: std::env::var("EXTRACT_MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.extract_max_attempts),
            extract_retry_delay_ms: std::env::var("EXTRACT_RETRY_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.extract_retry_delay_ms),
            github_api_base_url: std::env::var("GITHUB_API_BASE_URL").unwrap_or(default.github_api_base_url),
            settings_file: std::env::var("SETTINGS_FILE").unwrap_or(default.settings_file),
            github_token: std::env::var("GITHUB_TOKEN").ok(),
            github_repo: std::env::var("GITHUB_REPO").ok(),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
