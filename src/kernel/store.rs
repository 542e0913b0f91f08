mod reducers;

use super::{Action, AppState, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn with_effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            state_changed: true,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::SetTitle(_)
            | Action::SetBody(_)
            | Action::Format(_)
            | Action::Edit(_)
            | Action::SetSelection(_)
            | Action::SelectArticle(_)
            | Action::ArticleLoaded { .. }
            | Action::ArticleLoadFailed { .. }
            | Action::SaveStarted { .. }
            | Action::SaveFinished { .. } => self.reduce_session_action(action),
            Action::ArticlesLoaded(_)
            | Action::ArticlesLoadFailed(_)
            | Action::CreateArticle
            | Action::ArticleCreated(_)
            | Action::CreateArticleFailed(_)
            | Action::ToggleCompleted(_)
            | Action::CompletedSaved { .. }
            | Action::SidebarMove(_)
            | Action::SidebarActivate => self.reduce_directory_action(action),
            Action::ToggleDarkMode => {
                self.state.ui.dark_mode = !self.state.ui.dark_mode;
                DispatchResult::changed(true)
            }
            Action::ToggleSidebar => {
                let ui = &mut self.state.ui;
                ui.sidebar_visible = !ui.sidebar_visible;
                if !ui.sidebar_visible && ui.focus == super::FocusTarget::Sidebar {
                    ui.focus = super::FocusTarget::Body;
                }
                DispatchResult::changed(true)
            }
            Action::FocusNext => {
                let ui = &mut self.state.ui;
                ui.focus = ui.focus.next(ui.sidebar_visible);
                DispatchResult::changed(true)
            }
            Action::Focus(target) => {
                let ui = &mut self.state.ui;
                if target == super::FocusTarget::Sidebar && !ui.sidebar_visible {
                    return DispatchResult::unchanged();
                }
                let prev = ui.focus;
                ui.focus = target;
                DispatchResult::changed(prev != target)
            }
            Action::OpenLinkPrompt => {
                if !self.state.session.can_edit() || self.state.ui.link_prompt.is_some() {
                    return DispatchResult::unchanged();
                }
                self.state.ui.link_prompt = Some(String::new());
                DispatchResult::changed(true)
            }
            Action::LinkPromptInput(ch) => match self.state.ui.link_prompt.as_mut() {
                Some(url) => {
                    url.push(ch);
                    DispatchResult::changed(true)
                }
                None => DispatchResult::unchanged(),
            },
            Action::LinkPromptSet(next) => match self.state.ui.link_prompt.as_mut() {
                Some(url) => {
                    let changed = *url != next;
                    *url = next;
                    DispatchResult::changed(changed)
                }
                None => DispatchResult::unchanged(),
            },
            Action::LinkPromptBackspace => match self.state.ui.link_prompt.as_mut() {
                Some(url) => DispatchResult::changed(url.pop().is_some()),
                None => DispatchResult::unchanged(),
            },
            Action::LinkPromptSubmit => {
                let Some(url) = self.state.ui.link_prompt.take() else {
                    return DispatchResult::unchanged();
                };
                let mut result =
                    self.dispatch(Action::Format(super::format::FormatCommand::InsertLink(url)));
                result.state_changed = true;
                result
            }
            Action::LinkPromptCancel => {
                DispatchResult::changed(self.state.ui.link_prompt.take().is_some())
            }
            Action::DismissNotice => DispatchResult::changed(self.state.ui.notice.take().is_some()),
            Action::Quit => {
                self.state.ui.should_quit = true;
                DispatchResult::changed(true)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
