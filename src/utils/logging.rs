/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。
pub fn init(verbose: bool) {
    let default_level = if verbose { "leetsync=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(port: u16, settings_file: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 LeetSync 启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🌐 浏览器调试端口: {}", port);
    info!("⚙️ 设置文件: {}", settings_file);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
