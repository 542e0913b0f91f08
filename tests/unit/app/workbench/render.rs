use super::*;
use crate::kernel::services::ports::Settings;
use crate::kernel::SaveStatus;
use crate::models::markup;
use crate::models::Article;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn screen(state: &AppState, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_state(frame, state, &UiTheme::light()))
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer.content[usize::from(y * width + x)].symbol().to_string())
                .collect()
        })
        .collect()
}

fn loaded_state(body: &str) -> AppState {
    let mut state = AppState::new(&Settings {
        goal: 4,
        ..Settings::default()
    });
    let mut article = Article::untitled("a");
    article.title = "Chapter One".into();
    article.body = body.into();
    state.directory.replace_all(vec![article.clone(), Article::untitled("b")]);
    state.directory.loaded = true;
    state.session.selected_article_id = Some("a".into());
    state.session.fill_from(&article);
    state
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[test]
fn screen_shows_listing_title_and_word_count() {
    let mut state = loaded_state("<p>one two</p>");
    state.directory.set_completed("b", true);

    let rows = screen(&state, 100, 20).join("\n");

    assert!(rows.contains("[ ] Chapter One"));
    assert!(rows.contains("[x] Untitled"));
    assert!(rows.contains("Chapter One"));
    assert!(rows.contains("one two"));
    assert!(rows.contains("2 / 4 words"));
    assert!(rows.contains("50.0%"));
    assert!(rows.contains("Not saved yet"));
}

#[test]
fn hidden_sidebar_is_not_drawn() {
    let mut state = loaded_state("<p>text</p>");
    state.ui.sidebar_visible = false;

    let rows = screen(&state, 80, 12).join("\n");

    assert!(!rows.contains("Articles"));
    assert!(rows.contains("text"));
}

#[test]
fn load_error_replaces_body() {
    let mut state = loaded_state("<p>text</p>");
    state.session.load_error = Some(crate::kernel::LoadError::NotFound("a".into()));
    state.session.save_status = SaveStatus::Saving;

    let rows = screen(&state, 100, 12).join("\n");

    assert!(rows.contains("Article a was not found"));
    assert!(rows.contains("Saving..."));
}

#[test]
fn link_prompt_is_overlaid() {
    let mut state = loaded_state("<p>text</p>");
    state.ui.link_prompt = Some("https://x.test".into());

    let rows = screen(&state, 100, 16).join("\n");

    assert!(rows.contains("https://x.test"));
}

#[test]
fn body_lines_prefix_blocks() {
    let doc = markup::parse("<h2>Part</h2><ol><li>a</li><li>b</li></ol><ul><li>c</li></ul>");
    let view = body_lines(
        &doc,
        Selection::caret(TextPosition::default()),
        false,
        &UiTheme::light(),
    );

    let texts: Vec<String> = view.lines.iter().map(line_text).collect();
    assert_eq!(texts, vec!["## Part", "  1. a", "  2. b", "  • c"]);
}

#[test]
fn caret_at_block_end_adds_reversed_cell() {
    let doc = markup::parse("<p>ab</p><p>cd</p>");
    let view = body_lines(
        &doc,
        Selection::caret(TextPosition::new(1, 2)),
        true,
        &UiTheme::light(),
    );

    assert_eq!(view.cursor_line, 1);
    let last = view.lines[1].spans.last().unwrap();
    assert_eq!(last.content, " ");
    assert!(last.style.add_modifier.contains(Modifier::REVERSED));
}

#[test]
fn selection_is_reversed_and_styles_carry_over() {
    let doc = markup::parse("<p><b>bold</b> plain</p>");
    let view = body_lines(&doc, Selection::within(0, 2, 6), false, &UiTheme::light());

    let spans = &view.lines[0].spans;
    let selected: String = spans
        .iter()
        .filter(|span| span.style.add_modifier.contains(Modifier::REVERSED))
        .map(|span| span.content.as_ref())
        .collect();
    assert_eq!(selected, "ld p");
    assert!(spans
        .iter()
        .any(|span| span.content == "bo" && span.style.add_modifier.contains(Modifier::BOLD)));
}

#[test]
fn code_block_newlines_split_lines() {
    let doc = markup::parse("<pre class=\"code-block\">let a;\nlet b;</pre>");
    let view = body_lines(
        &doc,
        Selection::caret(TextPosition::new(0, 8)),
        true,
        &UiTheme::light(),
    );

    let texts: Vec<String> = view.lines.iter().map(line_text).collect();
    assert_eq!(texts, vec!["│ let a;", "  let b;"]);
    assert_eq!(view.cursor_line, 1);
}

#[test]
fn scroll_keeps_cursor_visible() {
    let view = BodyView {
        lines: (0..10).map(|i| Line::from(format!("line {i}"))).collect(),
        cursor_line: 9,
    };

    assert_eq!(scroll_for_cursor(&view, 20, 4), 6);
    assert_eq!(scroll_for_cursor(&view, 20, 40), 0);
}

#[test]
fn body_text_runs_share_spans_by_style() {
    let doc = markup::parse("<p>plain text</p><p>a<b>b</b>c</p>");
    let view = body_lines(
        &doc,
        Selection::caret(TextPosition::default()),
        false,
        &UiTheme::light(),
    );

    let plain: Vec<&str> = view.lines[0].spans.iter().map(|span| span.content.as_ref()).collect();
    assert_eq!(plain, ["", "plain text"]);
    let mixed: Vec<&str> = view.lines[1].spans.iter().map(|span| span.content.as_ref()).collect();
    assert_eq!(mixed, ["", "a", "b", "c"]);
}
