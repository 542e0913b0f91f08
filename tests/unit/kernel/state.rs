use super::*;
use chrono::TimeZone;

#[test]
fn save_status_labels() {
    let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();

    assert_eq!(SaveStatus::Idle.label(), "Not saved yet");
    assert_eq!(SaveStatus::Saving.label(), "Saving...");
    assert_eq!(SaveStatus::SavedAt(at).label(), "Saved at 09:05:07");
}

#[test]
fn focus_cycle_skips_hidden_sidebar() {
    assert_eq!(FocusTarget::Body.next(true), FocusTarget::Sidebar);
    assert_eq!(FocusTarget::Body.next(false), FocusTarget::Title);
    assert_eq!(FocusTarget::Sidebar.next(true), FocusTarget::Title);
    assert_eq!(FocusTarget::Title.next(false), FocusTarget::Body);
}

#[test]
fn fill_from_keeps_body_verbatim() {
    let mut session = EditorSession::default();
    let article = Article {
        id: "a".into(),
        title: "Draft".into(),
        body: "<P>Hi&nbsp;there</P>".into(),
        completed: false,
    };

    session.fill_from(&article);

    assert_eq!(session.body, "<P>Hi&nbsp;there</P>");
    assert_eq!(session.document.plain_text(), "Hi there");
    session.sync_body();
    assert_eq!(session.body, "<p>Hi there</p>");
}

#[test]
fn editing_requires_a_loaded_selection() {
    let mut session = EditorSession::default();
    assert!(!session.can_edit());

    session.selected_article_id = Some("a".into());
    session.loading = true;
    assert!(!session.can_edit());

    session.loading = false;
    assert!(session.can_edit());

    session.load_error = Some(LoadError::NotFound("a".into()));
    assert!(!session.can_edit());
}

#[test]
fn app_state_takes_goal_from_settings() {
    let settings = Settings {
        goal: 4,
        dark_mode: true,
        ..Settings::default()
    };
    let mut state = AppState::new(&settings);
    state.session.body = "<p>one two</p>".into();

    assert!(state.ui.dark_mode);
    assert_eq!(state.word_count(), 2);
    assert_eq!(state.progress(), 50.0);
}
