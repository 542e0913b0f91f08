use crate::kernel::format::{self, FormatOutcome};
use crate::kernel::state::SaveStatus;
use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::{Action, Effect};
use crate::models::markup;

impl Store {
    pub(in crate::kernel::store) fn reduce_session_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::SetTitle(title) => {
                let session = &mut self.state.session;
                if !session.can_edit() || session.title == title {
                    return DispatchResult::unchanged();
                }
                session.title = title;
                self.persist()
            }
            Action::SetBody(body) => {
                let session = &mut self.state.session;
                if !session.can_edit() || session.body == body {
                    return DispatchResult::unchanged();
                }
                session.document = markup::parse(&body);
                session.selection = session.document.clamp_selection(session.selection);
                session.body = body;
                self.persist()
            }
            Action::Format(command) => {
                if !self.state.session.can_edit() {
                    return DispatchResult::unchanged();
                }
                let session = &mut self.state.session;
                let outcome = format::apply(&mut session.document, session.selection, &command);
                self.apply_outcome(outcome)
            }
            Action::Edit(command) => {
                if !self.state.session.can_edit() {
                    return DispatchResult::unchanged();
                }
                let session = &mut self.state.session;
                let outcome = format::apply_edit(&mut session.document, session.selection, &command);
                self.apply_outcome(outcome)
            }
            Action::SetSelection(selection) => {
                let session = &mut self.state.session;
                let selection = session.document.clamp_selection(selection);
                let changed = selection != session.selection;
                session.selection = selection;
                DispatchResult::changed(changed)
            }
            Action::SelectArticle(id) => {
                let session = &mut self.state.session;
                if session.selected_article_id.as_ref() == Some(&id) && session.load_error.is_none()
                {
                    return DispatchResult::unchanged();
                }

                session.fetch_generation += 1;
                session.selected_article_id = Some(id.clone());
                session.loading = true;
                session.load_error = None;
                match self.state.directory.get(&id) {
                    Some(cached) => session.fill_from(cached),
                    None => session.clear_content(),
                }
                if let Some(index) = self.state.directory.position(&id) {
                    self.state.ui.sidebar_cursor = index;
                }

                tracing::debug!(article = %id, generation = session.fetch_generation, "article selected");
                DispatchResult::with_effect(Effect::FetchArticle {
                    id,
                    generation: session.fetch_generation,
                })
            }
            Action::ArticleLoaded {
                id,
                generation,
                article,
            } => {
                if !self.is_current_fetch(&id, generation) {
                    tracing::debug!(article = %id, generation, "discarding stale fetch result");
                    return DispatchResult::unchanged();
                }
                let session = &mut self.state.session;
                session.loading = false;
                session.load_error = None;
                session.fill_from(&article);
                self.state.directory.append(article);
                DispatchResult::changed(true)
            }
            Action::ArticleLoadFailed {
                id,
                generation,
                error,
            } => {
                if !self.is_current_fetch(&id, generation) {
                    tracing::debug!(article = %id, generation, "discarding stale fetch failure");
                    return DispatchResult::unchanged();
                }
                tracing::warn!(article = %id, error = ?error, "article failed to load");
                let session = &mut self.state.session;
                session.loading = false;
                session.load_error = Some(error);
                DispatchResult::changed(true)
            }
            Action::SaveStarted { id } => {
                tracing::trace!(article = %id, "save started");
                let session = &mut self.state.session;
                session.saves_in_flight += 1;
                session.save_status = SaveStatus::Saving;
                DispatchResult::changed(true)
            }
            Action::SaveFinished { id, saved_at } => {
                let session = &mut self.state.session;
                session.saves_in_flight = session.saves_in_flight.saturating_sub(1);
                match saved_at {
                    Some(at) => session.last_saved = Some(at),
                    None => tracing::debug!(article = %id, "save did not land, keeping previous status"),
                }
                if session.saves_in_flight == 0 {
                    session.save_status = session
                        .last_saved
                        .map(SaveStatus::SavedAt)
                        .unwrap_or(SaveStatus::Idle);
                }
                DispatchResult::changed(true)
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn is_current_fetch(&self, id: &str, generation: u64) -> bool {
        let session = &self.state.session;
        session.selected_article_id.as_deref() == Some(id)
            && session.fetch_generation == generation
    }

    fn apply_outcome(&mut self, outcome: FormatOutcome) -> DispatchResult {
        let session = &mut self.state.session;
        let moved = outcome.selection != session.selection;
        session.selection = outcome.selection;
        if !outcome.changed {
            return DispatchResult::changed(moved);
        }
        session.sync_body();
        self.persist()
    }

    /// Mirrors the session into the listing and schedules a write for the selected id.
    fn persist(&mut self) -> DispatchResult {
        let session = &self.state.session;
        let Some(id) = session.selected_article_id.clone() else {
            return DispatchResult::changed(true);
        };
        self.state
            .directory
            .update_content(&id, &session.title, &session.body);
        DispatchResult::with_effect(Effect::SchedulePersist {
            id,
            title: session.title.clone(),
            body: session.body.clone(),
        })
    }
}
