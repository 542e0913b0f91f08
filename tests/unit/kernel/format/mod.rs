use super::*;
use crate::models::markup::{parse, render};
use crate::models::{Block, BlockKind, InlineStyle, ListKind, Run, TextPosition};

const AMBER: &str = "#fcd34d";

fn run_cmd(markup: &str, selection: Selection, command: FormatCommand) -> (String, FormatOutcome) {
    let mut doc = parse(markup);
    let outcome = apply(&mut doc, selection, &command);
    (render(&doc), outcome)
}

#[test]
fn toggle_bold_applies_then_removes() {
    let mut doc = parse("<p>hello world</p>");
    let sel = Selection::within(0, 0, 5);

    apply(&mut doc, sel, &FormatCommand::ToggleBold);
    assert_eq!(render(&doc), "<p><b>hello</b> world</p>");

    apply(&mut doc, sel, &FormatCommand::ToggleBold);
    assert_eq!(render(&doc), "<p>hello world</p>");
}

#[test]
fn toggle_applies_when_selection_is_partially_marked() {
    let (markup, _) = run_cmd(
        "<p><i>he</i>llo</p>",
        Selection::within(0, 0, 5),
        FormatCommand::ToggleItalic,
    );

    assert_eq!(markup, "<p><i>hello</i></p>");
}

#[test]
fn toggle_underline_spans_blocks() {
    let sel = Selection::new(TextPosition::new(0, 2), TextPosition::new(1, 2));
    let (markup, outcome) = run_cmd("<p>abcd</p><p>efgh</p>", sel, FormatCommand::ToggleUnderline);

    assert!(outcome.changed);
    assert_eq!(markup, "<p>ab<u>cd</u></p><p><u>ef</u>gh</p>");
}

#[test]
fn collapsed_selection_does_not_toggle_marks() {
    let (markup, outcome) = run_cmd(
        "<p>hello</p>",
        Selection::caret(TextPosition::new(0, 2)),
        FormatCommand::ToggleBold,
    );

    assert!(!outcome.changed);
    assert_eq!(markup, "<p>hello</p>");
}

#[test]
fn highlight_twice_with_same_color_returns_to_unformatted() {
    let mut doc = parse("<p>hello world</p>");
    let sel = Selection::within(0, 0, 5);

    apply(&mut doc, sel, &FormatCommand::Highlight(AMBER.to_string()));
    assert_eq!(
        render(&doc),
        "<p><span style=\"background-color: #fcd34d;\">hello</span> world</p>"
    );

    apply(&mut doc, sel, &FormatCommand::Highlight(AMBER.to_string()));
    assert_eq!(render(&doc), "<p>hello world</p>");
}

#[test]
fn highlight_toggle_off_strips_all_formatting_but_keeps_links() {
    let markup = "<p><a href=\"https://x.test\"><span style=\"background-color: #fcd34d;\"><b>word</b></span></a></p>";
    let (markup, _) = run_cmd(
        markup,
        Selection::within(0, 0, 4),
        FormatCommand::Highlight(AMBER.to_string()),
    );

    assert_eq!(markup, "<p><a href=\"https://x.test\">word</a></p>");
}

#[test]
fn highlight_with_other_color_replaces_existing_one() {
    let (markup, _) = run_cmd(
        "<p><span style=\"background-color: #fcd34d;\">word</span></p>",
        Selection::within(0, 0, 4),
        FormatCommand::Highlight("#93c5fd".to_string()),
    );

    assert_eq!(
        markup,
        "<p><span style=\"background-color: #93c5fd;\">word</span></p>"
    );
}

#[test]
fn insert_link_requires_url() {
    let (markup, outcome) = run_cmd(
        "<p>click here</p>",
        Selection::within(0, 6, 10),
        FormatCommand::InsertLink("   ".to_string()),
    );

    assert!(!outcome.changed);
    assert_eq!(markup, "<p>click here</p>");
}

#[test]
fn insert_link_wraps_selection_without_validation() {
    let (markup, _) = run_cmd(
        "<p>click here</p>",
        Selection::within(0, 6, 10),
        FormatCommand::InsertLink("not a url".to_string()),
    );

    assert_eq!(markup, "<p>click <a href=\"not a url\">here</a></p>");
}

#[test]
fn insert_link_at_caret_inserts_url_text() {
    let (markup, outcome) = run_cmd(
        "<p>see </p>",
        Selection::caret(TextPosition::new(0, 4)),
        FormatCommand::InsertLink("https://x.test".to_string()),
    );

    assert_eq!(
        markup,
        "<p>see <a href=\"https://x.test\">https://x.test</a></p>"
    );
    assert_eq!(outcome.selection, Selection::caret(TextPosition::new(0, 18)));
}

#[test]
fn list_command_converts_and_toggles_back() {
    let mut doc = parse("<p>one</p><p>two</p>");
    let sel = Selection::new(TextPosition::new(0, 0), TextPosition::new(1, 1));

    apply(&mut doc, sel, &FormatCommand::InsertUnorderedList);
    assert_eq!(render(&doc), "<ul><li>one</li><li>two</li></ul>");

    apply(&mut doc, sel, &FormatCommand::InsertOrderedList);
    assert_eq!(render(&doc), "<ol><li>one</li><li>two</li></ol>");

    apply(&mut doc, sel, &FormatCommand::InsertOrderedList);
    assert_eq!(render(&doc), "<p>one</p><p>two</p>");
}

#[test]
fn list_command_lifts_emphasized_run_into_first_item() {
    let (markup, outcome) = run_cmd(
        "<p>before <b>styled</b> after</p>",
        Selection::caret(TextPosition::new(0, 9)),
        FormatCommand::InsertUnorderedList,
    );

    assert_eq!(
        markup,
        "<p>before </p><ul><li><b>styled</b></li></ul><p> after</p>"
    );
    assert_eq!(outcome.selection, Selection::caret(TextPosition::new(1, 2)));
}

#[test]
fn list_command_lifts_highlighted_run_at_block_start() {
    let (markup, _) = run_cmd(
        "<p><span style=\"background-color: #fcd34d;\">marked</span> rest</p>",
        Selection::within(0, 1, 3),
        FormatCommand::InsertOrderedList,
    );

    assert_eq!(
        markup,
        "<ol><li><span style=\"background-color: #fcd34d;\">marked</span></li></ol><p> rest</p>"
    );
}

#[test]
fn list_command_leaves_plain_runs_whole() {
    let (markup, _) = run_cmd(
        "<p>plain <i>italic</i></p>",
        Selection::caret(TextPosition::new(0, 8)),
        FormatCommand::InsertUnorderedList,
    );

    assert_eq!(markup, "<ul><li>plain <i>italic</i></li></ul>");
}

#[test]
fn list_command_does_not_lift_runs_already_in_a_list() {
    let mut doc = Document::from_blocks(vec![Block::with_runs(
        BlockKind::ListItem(ListKind::Unordered),
        vec![
            Run::plain("a "),
            Run::new(
                "b",
                InlineStyle {
                    bold: true,
                    ..InlineStyle::default()
                },
            ),
        ],
    )]);

    apply(
        &mut doc,
        Selection::caret(TextPosition::new(0, 2)),
        &FormatCommand::InsertOrderedList,
    );

    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].kind, BlockKind::ListItem(ListKind::Ordered));
}

#[test]
fn set_block_format_headings_and_back() {
    let mut doc = parse("<p>Chapter one</p>");
    let sel = Selection::caret(TextPosition::new(0, 0));

    let outcome = apply(&mut doc, sel, &FormatCommand::SetBlockFormat(BlockFormat::H2));
    assert!(outcome.changed);
    assert_eq!(render(&doc), "<h2>Chapter one</h2>");

    let outcome = apply(&mut doc, sel, &FormatCommand::SetBlockFormat(BlockFormat::H2));
    assert!(!outcome.changed);

    apply(&mut doc, sel, &FormatCommand::SetBlockFormat(BlockFormat::Paragraph));
    assert_eq!(render(&doc), "<p>Chapter one</p>");
}

#[test]
fn code_block_is_marked_with_class_and_toggles() {
    let mut doc = parse("<p>fn main() {}</p>");
    let sel = Selection::caret(TextPosition::new(0, 3));

    apply(&mut doc, sel, &FormatCommand::InsertCodeBlock);
    assert_eq!(render(&doc), "<pre class=\"code-block\">fn main() {}</pre>");

    apply(&mut doc, sel, &FormatCommand::InsertCodeBlock);
    assert_eq!(render(&doc), "<p>fn main() {}</p>");
}

#[test]
fn out_of_range_selection_is_clamped() {
    let (markup, _) = run_cmd(
        "<p>abc</p>",
        Selection::within(7, 0, 99),
        FormatCommand::ToggleBold,
    );

    assert_eq!(markup, "<p><b>abc</b></p>");
}
