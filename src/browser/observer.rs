//! 页面事件通道
//!
//! 通过 DevTools runtime binding 把页面内的回调转成 Rust 侧的事件流：
//! - `MUTATION_BINDING` 由 MutationObserver 在每次 DOM 变更时调用
//! - `SYNC_BINDING` 由同步按钮在点击时调用

use anyhow::{Context, Result};
use chromiumoxide::cdp::js_protocol::runtime::{AddBindingParams, EventBindingCalled};
use chromiumoxide::Page;
use futures::stream::BoxStream;
use futures::{FutureExt, Stream, StreamExt};
use tracing::debug;

pub const MUTATION_BINDING: &str = "__leetsyncMutation";
pub const SYNC_BINDING: &str = "__leetsyncSync";

/// 页面发来的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// DOM 发生变更
    Mutation,
    /// 用户点击了同步按钮
    SyncRequested,
}

impl PageEvent {
    pub fn from_binding(name: &str) -> Option<Self> {
        match name {
            MUTATION_BINDING => Some(PageEvent::Mutation),
            SYNC_BINDING => Some(PageEvent::SyncRequested),
            _ => None,
        }
    }
}

/// 注册 binding 并返回事件流
///
/// binding 在同一 target 内跨导航保留，只需注册一次。
pub async fn register_bindings(page: &Page) -> Result<BoxStream<'static, PageEvent>> {
    let events = page
        .event_listener::<EventBindingCalled>()
        .await
        .context("无法订阅 Runtime.bindingCalled")?;

    for name in [MUTATION_BINDING, SYNC_BINDING] {
        page.execute(AddBindingParams::new(name))
            .await
            .with_context(|| format!("无法注册 binding: {}", name))?;
        debug!("已注册 binding: {}", name);
    }

    Ok(events
        .filter_map(|event| futures::future::ready(PageEvent::from_binding(&event.name)))
        .boxed())
}

/// 一批已经到达的事件
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventBatch {
    pub mutations: usize,
    pub sync_requests: usize,
}

/// 等待下一个事件，并把已经就绪的事件一起取出
///
/// 渲染框架一次会产生大量变更，合并后只需检测一次。
/// 流结束时返回 `None`。
pub async fn next_batch<S>(events: &mut S) -> Option<EventBatch>
where
    S: Stream<Item = PageEvent> + Unpin,
{
    let first = events.next().await?;
    let mut batch = EventBatch::default();
    batch.push(first);

    while let Some(Some(event)) = events.next().now_or_never() {
        batch.push(event);
    }

    Some(batch)
}

impl EventBatch {
    fn push(&mut self, event: PageEvent) {
        match event {
            PageEvent::Mutation => self.mutations += 1,
            PageEvent::SyncRequested => self.sync_requests += 1,
        }
    }
}
