//! 工作台：把 kernel 的 Store、持久化网关和异步运行时连在一起。
//!
//! 与终端无关的部分（dispatch / tick / shutdown）总是编译，
//! 按键映射和渲染只在 `tui` feature 下存在。

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::services::ports::{DocumentStore, Settings};
use crate::kernel::{Action, AppState, Effect, PersistenceGateway, Store};

#[cfg(feature = "tui")]
use super::theme::ThemePair;

#[cfg(feature = "tui")]
mod input;
#[cfg(feature = "tui")]
mod render;
mod tick;

#[cfg(feature = "tui")]
pub use input::{key_to_action, paste_to_action};

const MAX_MESSAGES_PER_TICK: usize = 64;

pub struct Workbench {
    store: Store,
    gateway: PersistenceGateway,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    #[cfg(feature = "tui")]
    themes: ThemePair,
}

impl Workbench {
    pub fn new(settings: &Settings, document_store: Arc<dyn DocumentStore>) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(
            tx,
            document_store,
            settings.document_type.clone(),
            settings.retry,
        )?;

        Ok(Self {
            store: Store::new(AppState::new(settings)),
            gateway: PersistenceGateway::new(settings.save_delay()),
            runtime,
            rx,
            #[cfg(feature = "tui")]
            themes: ThemePair::detect(),
        })
    }

    /// 请求文章列表，到达后自动选中第一篇。
    pub fn start(&mut self) {
        self.run_effect(Effect::ListArticles, Instant::now());
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().ui.should_quit
    }

    /// 还有未交给存储的编辑，或仍在写入中。
    pub fn has_pending_writes(&self) -> bool {
        self.gateway.has_pending() || self.store.state().session.saves_in_flight > 0
    }

    /// 最早的防抖截止时间，主循环据此决定何时醒来。
    pub fn next_deadline(&self) -> Option<Instant> {
        self.gateway.next_deadline()
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.dispatch_at(action, Instant::now())
    }

    /// 同 `dispatch`，防抖截止时间按 `now` 计算。
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect, now);
        }
        result.state_changed
    }

    fn run_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::ListArticles => self.runtime.list_articles(),
            Effect::FetchArticle { id, generation } => self.runtime.fetch_article(id, generation),
            Effect::SchedulePersist { id, title, body } => {
                self.gateway.schedule(id, title, body, now)
            }
            Effect::CreateArticle => self.runtime.create_article(),
            Effect::SetCompleted { id, completed } => self.runtime.set_completed(id, completed),
        }
    }

    /// 最多阻塞 `timeout` 等一条运行时消息并处理。
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.handle_message(msg);
                true
            }
            Err(_) => false,
        }
    }

    /// 把所有待保存的编辑交给存储并等待写入完成。
    ///
    /// 超时仍有写入未完成时返回 `false`。
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        let pending = self.gateway.flush_all();
        if !pending.is_empty() {
            tracing::info!(count = pending.len(), "flushing pending saves");
        }
        for request in pending {
            self.start_save(request);
        }

        let deadline = Instant::now() + timeout;
        while self.store.state().session.saves_in_flight > 0 {
            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    in_flight = self.store.state().session.saves_in_flight,
                    "shutdown timed out with saves in flight"
                );
                return false;
            }
            self.wait_for_message(deadline - now);
        }
        true
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
