use leetsync::browser::{connect_to_browser_and_page, register_bindings};
use leetsync::config::Config;
use leetsync::infrastructure::{JsExecutor, PageSource, SyncControl};
use leetsync::utils::logging;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_browser_connection() {
    logging::init(true);

    let config = Config::from_env();

    let result = connect_to_browser_and_page(
        config.browser_debug_port,
        &config.target_url,
        config.target_title.as_deref(),
    )
    .await;

    assert!(result.is_ok(), "应该能够成功连接浏览器");
}

#[tokio::test]
#[ignore]
async fn test_read_location_and_install_scripts() {
    logging::init(true);

    let config = Config::from_env();
    let (_browser, page) = connect_to_browser_and_page(
        config.browser_debug_port,
        &config.target_url,
        config.target_title.as_deref(),
    )
    .await
    .expect("连接浏览器失败");

    let _events = register_bindings(&page).await.expect("注册 binding 失败");
    let executor = JsExecutor::new(page);

    let location = executor.location().await.expect("读取页面位置失败");
    println!("当前路径: {}", location.pathname);
    println!("页面标题: {:?}", location.title);

    executor.install_observer().await.expect("安装 MutationObserver 失败");
    executor.install().await.expect("注入同步按钮失败");

    let found = executor.has_exact_text("Accepted").await.expect("查找文本失败");
    println!("Accepted: {}", found);
}
