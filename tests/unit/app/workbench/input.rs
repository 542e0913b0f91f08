use super::*;
use crate::kernel::services::ports::Settings;
use crate::models::Article;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn alt(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::ALT)
}

fn state_with_focus(focus: FocusTarget) -> AppState {
    let mut state = AppState::new(&Settings::default());
    state.ui.focus = focus;
    state
}

#[test]
fn release_events_are_ignored() {
    let state = state_with_focus(FocusTarget::Body);
    let release = KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release);
    assert!(key_to_action(&state, release).is_none());
}

#[test]
fn body_typing_and_motion() {
    let state = state_with_focus(FocusTarget::Body);

    assert!(matches!(
        key_to_action(&state, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
        Some(Action::Edit(EditCommand::InsertText(text))) if text == "A"
    ));
    assert!(matches!(
        key_to_action(&state, key(KeyCode::Enter)),
        Some(Action::Edit(EditCommand::InsertNewline))
    ));
    assert!(matches!(
        key_to_action(&state, KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT)),
        Some(Action::Edit(EditCommand::MoveLeft { extend: true }))
    ));
    assert!(matches!(
        key_to_action(&state, ctrl('a')),
        Some(Action::Edit(EditCommand::SelectAll))
    ));
}

#[test]
fn formatting_shortcuts() {
    let state = state_with_focus(FocusTarget::Body);

    assert!(matches!(
        key_to_action(&state, alt('b')),
        Some(Action::Format(FormatCommand::ToggleBold))
    ));
    assert!(matches!(
        key_to_action(&state, alt('2')),
        Some(Action::Format(FormatCommand::SetBlockFormat(BlockFormat::H2)))
    ));
    assert!(matches!(
        key_to_action(&state, alt('h')),
        Some(Action::Format(FormatCommand::Highlight(color))) if color == "#fcd34d"
    ));
    assert!(matches!(key_to_action(&state, alt('k')), Some(Action::OpenLinkPrompt)));
}

#[test]
fn app_commands() {
    let state = state_with_focus(FocusTarget::Title);

    assert!(matches!(key_to_action(&state, ctrl('q')), Some(Action::Quit)));
    assert!(matches!(key_to_action(&state, ctrl('n')), Some(Action::CreateArticle)));
    assert!(matches!(key_to_action(&state, ctrl('d')), Some(Action::ToggleDarkMode)));
    assert!(matches!(key_to_action(&state, ctrl('e')), Some(Action::ToggleSidebar)));
    assert!(matches!(key_to_action(&state, key(KeyCode::Tab)), Some(Action::FocusNext)));
    assert!(key_to_action(&state, ctrl('a')).is_none());
}

#[test]
fn title_edits_rebuild_the_whole_title() {
    let mut state = state_with_focus(FocusTarget::Title);
    state.session.title = "Chapte".into();

    assert!(matches!(
        key_to_action(&state, key(KeyCode::Char('r'))),
        Some(Action::SetTitle(title)) if title == "Chapter"
    ));
    assert!(matches!(
        key_to_action(&state, key(KeyCode::Backspace)),
        Some(Action::SetTitle(title)) if title == "Chapt"
    ));

    state.session.title.clear();
    assert!(key_to_action(&state, key(KeyCode::Backspace)).is_none());
}

#[test]
fn sidebar_space_toggles_article_under_cursor() {
    let mut state = state_with_focus(FocusTarget::Sidebar);
    state
        .directory
        .replace_all(vec![Article::untitled("a"), Article::untitled("b")]);
    state.ui.sidebar_cursor = 1;

    assert!(matches!(
        key_to_action(&state, key(KeyCode::Char(' '))),
        Some(Action::ToggleCompleted(id)) if id == "b"
    ));
    assert!(matches!(
        key_to_action(&state, key(KeyCode::Char('j'))),
        Some(Action::SidebarMove(1))
    ));
    assert!(matches!(key_to_action(&state, key(KeyCode::Enter)), Some(Action::SidebarActivate)));
}

#[test]
fn link_prompt_captures_keys() {
    let mut state = state_with_focus(FocusTarget::Body);
    state.ui.link_prompt = Some(String::new());

    assert!(matches!(
        key_to_action(&state, key(KeyCode::Char('q'))),
        Some(Action::LinkPromptInput('q'))
    ));
    assert!(key_to_action(&state, ctrl('q')).is_none());
    assert!(matches!(key_to_action(&state, key(KeyCode::Enter)), Some(Action::LinkPromptSubmit)));
    assert!(matches!(key_to_action(&state, key(KeyCode::Esc)), Some(Action::LinkPromptCancel)));
}

#[test]
fn escape_dismisses_notice() {
    let mut state = state_with_focus(FocusTarget::Body);
    assert!(key_to_action(&state, key(KeyCode::Esc)).is_none());

    state.ui.notice = Some("oops".into());
    assert!(matches!(key_to_action(&state, key(KeyCode::Esc)), Some(Action::DismissNotice)));
}

#[test]
fn paste_follows_focus() {
    let mut state = state_with_focus(FocusTarget::Body);
    assert!(matches!(
        paste_to_action(&state, "a\r\nb".into()),
        Some(Action::Edit(EditCommand::InsertText(text))) if text == "a\r\nb"
    ));

    state.ui.focus = FocusTarget::Title;
    state.session.title = "Part ".into();
    assert!(matches!(
        paste_to_action(&state, "Two\nrest".into()),
        Some(Action::SetTitle(title)) if title == "Part Two"
    ));

    state.ui.link_prompt = Some("https://".into());
    assert!(matches!(
        paste_to_action(&state, " x.test \n".into()),
        Some(Action::LinkPromptSet(url)) if url == "https://x.test"
    ));

    state.ui.link_prompt = None;
    state.ui.focus = FocusTarget::Sidebar;
    assert!(paste_to_action(&state, "ignored".into()).is_none());
    assert!(paste_to_action(&state, String::new()).is_none());
}
