use super::Workbench;
use crate::kernel::{Action, AppState, BlockFormat, EditCommand, FocusTarget, FormatCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

impl Workbench {
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(self.store.state(), key) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    pub fn handle_paste(&mut self, text: String) -> bool {
        match paste_to_action(self.store.state(), text) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }
}

/// 粘贴交给当前焦点；标题只取第一行。
pub fn paste_to_action(state: &AppState, text: String) -> Option<Action> {
    if text.is_empty() {
        return None;
    }
    if let Some(url) = &state.ui.link_prompt {
        let pasted = text.lines().next().unwrap_or_default().trim();
        return Some(Action::LinkPromptSet(format!("{url}{pasted}")));
    }
    match state.ui.focus {
        FocusTarget::Body => Some(Action::Edit(EditCommand::InsertText(text))),
        FocusTarget::Title => {
            let line = text.lines().next().unwrap_or_default();
            Some(Action::SetTitle(format!("{}{line}", state.session.title)))
        }
        FocusTarget::Sidebar => None,
    }
}

/// 固定键位：格式化走 Alt，Ctrl 留给应用命令。
pub fn key_to_action(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if state.ui.link_prompt.is_some() {
        return link_prompt_key(key);
    }

    if let Some(action) = global_key(state, key) {
        return Some(action);
    }

    match state.ui.focus {
        FocusTarget::Sidebar => sidebar_key(state, key),
        FocusTarget::Title => title_key(state, key),
        FocusTarget::Body => body_key(key),
    }
}

fn link_prompt_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::LinkPromptSubmit),
        KeyCode::Esc => Some(Action::LinkPromptCancel),
        KeyCode::Backspace => Some(Action::LinkPromptBackspace),
        KeyCode::Char(ch) if is_typing(key.modifiers) => Some(Action::LinkPromptInput(ch)),
        _ => None,
    }
}

fn global_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl {
        return match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::CreateArticle),
            KeyCode::Char('d') => Some(Action::ToggleDarkMode),
            KeyCode::Char('e') => Some(Action::ToggleSidebar),
            KeyCode::Char('a') if state.ui.focus == FocusTarget::Body => {
                Some(Action::Edit(EditCommand::SelectAll))
            }
            _ => None,
        };
    }

    if alt {
        let command = match key.code {
            KeyCode::Char('b') => FormatCommand::ToggleBold,
            KeyCode::Char('i') => FormatCommand::ToggleItalic,
            KeyCode::Char('u') => FormatCommand::ToggleUnderline,
            KeyCode::Char('l') => FormatCommand::InsertUnorderedList,
            KeyCode::Char('o') => FormatCommand::InsertOrderedList,
            KeyCode::Char('c') => FormatCommand::InsertCodeBlock,
            KeyCode::Char('h') => FormatCommand::Highlight(state.highlight_color.clone()),
            KeyCode::Char('1') => FormatCommand::SetBlockFormat(BlockFormat::H1),
            KeyCode::Char('2') => FormatCommand::SetBlockFormat(BlockFormat::H2),
            KeyCode::Char('3') => FormatCommand::SetBlockFormat(BlockFormat::H3),
            KeyCode::Char('0') => FormatCommand::SetBlockFormat(BlockFormat::Paragraph),
            KeyCode::Char('k') => return Some(Action::OpenLinkPrompt),
            _ => return None,
        };
        return Some(Action::Format(command));
    }

    match key.code {
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::Esc if state.ui.notice.is_some() => Some(Action::DismissNotice),
        _ => None,
    }
}

fn sidebar_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SidebarMove(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SidebarMove(1)),
        KeyCode::PageUp => Some(Action::SidebarMove(-10)),
        KeyCode::PageDown => Some(Action::SidebarMove(10)),
        KeyCode::Enter => Some(Action::SidebarActivate),
        KeyCode::Char(' ') => state
            .directory
            .articles()
            .get(state.ui.sidebar_cursor)
            .map(|article| Action::ToggleCompleted(article.id.clone())),
        _ => None,
    }
}

fn title_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let title = &state.session.title;
    match key.code {
        KeyCode::Enter | KeyCode::Down => Some(Action::Focus(FocusTarget::Body)),
        KeyCode::Backspace => {
            let mut next = title.clone();
            next.pop()?;
            Some(Action::SetTitle(next))
        }
        KeyCode::Char(ch) if is_typing(key.modifiers) => Some(Action::SetTitle(format!("{title}{ch}"))),
        _ => None,
    }
}

fn body_key(key: KeyEvent) -> Option<Action> {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    let command = match key.code {
        KeyCode::Char(ch) if is_typing(key.modifiers) => EditCommand::InsertText(ch.to_string()),
        KeyCode::Enter => EditCommand::InsertNewline,
        KeyCode::Backspace => EditCommand::Backspace,
        KeyCode::Left => EditCommand::MoveLeft { extend },
        KeyCode::Right => EditCommand::MoveRight { extend },
        KeyCode::Up => EditCommand::MoveUp { extend },
        KeyCode::Down => EditCommand::MoveDown { extend },
        KeyCode::Home => EditCommand::MoveLineStart { extend },
        KeyCode::End => EditCommand::MoveLineEnd { extend },
        _ => return None,
    };
    Some(Action::Edit(command))
}

fn is_typing(modifiers: KeyModifiers) -> bool {
    modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench/input.rs"]
mod tests;
