use crate::kernel::state::FocusTarget;
use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::{Action, Effect};

impl Store {
    pub(in crate::kernel::store) fn reduce_directory_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ArticlesLoaded(articles) => {
                tracing::info!(count = articles.len(), "article listing loaded");
                // A listing issued before a create can land after it; keep the open entry.
                let open = self
                    .state
                    .session
                    .selected_article_id
                    .as_deref()
                    .and_then(|id| self.state.directory.get(id))
                    .cloned();
                self.state.directory.replace_all(articles);
                if let Some(article) = open {
                    if self.state.directory.get(&article.id).is_none() {
                        self.state.directory.append(article);
                    }
                }

                let session = &self.state.session;
                if let Some(id) = session.selected_article_id.as_deref() {
                    if session.can_edit() {
                        self.state
                            .directory
                            .update_content(id, &session.title, &session.body);
                    }
                }
                self.clamp_sidebar_cursor();

                if self.state.session.selected_article_id.is_none() {
                    if let Some(first) = self.state.directory.first_id().cloned() {
                        return self.dispatch(Action::SelectArticle(first));
                    }
                }
                DispatchResult::changed(true)
            }
            Action::ArticlesLoadFailed(error) => {
                tracing::warn!(error = %error, "failed to load article listing");
                self.state.ui.notice = Some(format!("Could not load articles: {error}"));
                self.state.directory.set_load_error(error);
                DispatchResult::changed(true)
            }
            Action::CreateArticle => {
                if self.state.directory.creating {
                    return DispatchResult::unchanged();
                }
                self.state.directory.creating = true;
                DispatchResult::with_effect(Effect::CreateArticle)
            }
            Action::ArticleCreated(article) => {
                self.state.directory.creating = false;
                self.state.directory.append(article.clone());

                // Selected without a fetch: the store just handed back the whole record.
                let session = &mut self.state.session;
                session.fetch_generation += 1;
                session.selected_article_id = Some(article.id.clone());
                session.loading = false;
                session.load_error = None;
                session.fill_from(&article);
                if let Some(index) = self.state.directory.position(&article.id) {
                    self.state.ui.sidebar_cursor = index;
                }
                self.state.ui.focus = FocusTarget::Title;
                DispatchResult::changed(true)
            }
            Action::CreateArticleFailed(error) => {
                tracing::warn!(error = %error, "failed to create article");
                self.state.directory.creating = false;
                self.state.ui.notice = Some(format!("Could not create article: {error}"));
                DispatchResult::changed(true)
            }
            Action::ToggleCompleted(id) => match self.state.directory.toggle_completed(&id) {
                Some(completed) => {
                    DispatchResult::with_effect(Effect::SetCompleted { id, completed })
                }
                None => DispatchResult::unchanged(),
            },
            Action::CompletedSaved {
                id,
                completed,
                success,
            } => {
                if success {
                    return DispatchResult::unchanged();
                }
                tracing::warn!(article = %id, completed, "reverting completed flag after failed write");
                self.state.directory.set_completed(&id, !completed);
                self.state.ui.notice = Some("Could not update completed flag".to_string());
                DispatchResult::changed(true)
            }
            Action::SidebarMove(delta) => {
                let len = self.state.directory.len();
                if len == 0 {
                    return DispatchResult::unchanged();
                }
                let prev = self.state.ui.sidebar_cursor;
                let next = prev.saturating_add_signed(delta).min(len - 1);
                self.state.ui.sidebar_cursor = next;
                DispatchResult::changed(next != prev)
            }
            Action::SidebarActivate => {
                let Some(id) = self
                    .state
                    .directory
                    .articles()
                    .get(self.state.ui.sidebar_cursor)
                    .map(|article| article.id.clone())
                else {
                    return DispatchResult::unchanged();
                };
                self.state.ui.focus = FocusTarget::Body;
                let mut result = self.dispatch(Action::SelectArticle(id));
                result.state_changed = true;
                result
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn clamp_sidebar_cursor(&mut self) {
        let len = self.state.directory.len();
        let cursor = &mut self.state.ui.sidebar_cursor;
        *cursor = (*cursor).min(len.saturating_sub(1));
    }
}
