use super::Workbench;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::{Action, SaveRequest};
use std::sync::mpsc;
use std::time::Instant;

impl Workbench {
    /// 主循环每帧调用：收取异步结果，并把到期的保存交给运行时。
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        changed |= self.poll_messages();
        changed |= self.poll_persistence(now);
        changed
    }

    fn poll_messages(&mut self) -> bool {
        let mut changed = false;
        let mut drained = 0usize;

        while drained < super::MAX_MESSAGES_PER_TICK {
            match self.rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    changed |= self.handle_message(msg);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::error!("runtime message channel disconnected");
                    break;
                }
            }
        }

        changed
    }

    fn poll_persistence(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for request in self.gateway.take_due(now) {
            changed |= self.start_save(request);
        }
        changed
    }

    pub(super) fn start_save(&mut self, request: SaveRequest) -> bool {
        let changed = self
            .store
            .dispatch(Action::SaveStarted {
                id: request.id.clone(),
            })
            .state_changed;
        self.runtime.save(request);
        changed
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        self.dispatch(message_action(msg))
    }
}

fn message_action(msg: AppMessage) -> Action {
    match msg {
        AppMessage::ArticlesListed(articles) => Action::ArticlesLoaded(articles),
        AppMessage::ArticlesListFailed { error } => Action::ArticlesLoadFailed(error),
        AppMessage::ArticleFetched {
            id,
            generation,
            result,
        } => match result {
            Ok(article) => Action::ArticleLoaded {
                id,
                generation,
                article,
            },
            Err(error) => Action::ArticleLoadFailed {
                id,
                generation,
                error,
            },
        },
        AppMessage::ArticleCreated(article) => Action::ArticleCreated(article),
        AppMessage::CreateFailed { error } => Action::CreateArticleFailed(error),
        AppMessage::SaveFinished { id, saved_at } => Action::SaveFinished { id, saved_at },
        AppMessage::CompletedSaved {
            id,
            completed,
            success,
        } => Action::CompletedSaved {
            id,
            completed,
            success,
        },
    }
}
