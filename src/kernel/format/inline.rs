use super::FormatOutcome;
use crate::models::{Document, InlineStyle, Selection, TextPosition};

#[derive(Debug, Clone, Copy)]
pub(super) enum Mark {
    Bold,
    Italic,
    Underline,
}

impl Mark {
    fn is_set(self, style: &InlineStyle) -> bool {
        match self {
            Mark::Bold => style.bold,
            Mark::Italic => style.italic,
            Mark::Underline => style.underline,
        }
    }

    fn set(self, style: &mut InlineStyle, on: bool) {
        match self {
            Mark::Bold => style.bold = on,
            Mark::Italic => style.italic = on,
            Mark::Underline => style.underline = on,
        }
    }
}

fn non_empty_spans(doc: &Document, selection: Selection) -> Vec<(usize, usize, usize)> {
    doc.block_spans(selection)
        .into_iter()
        .filter(|(_, from, to)| from < to)
        .collect()
}

pub(super) fn toggle_mark(doc: &mut Document, selection: Selection, mark: Mark) -> FormatOutcome {
    let spans = non_empty_spans(doc, selection);
    if selection.is_collapsed() || spans.is_empty() {
        return FormatOutcome::unchanged(selection);
    }

    let all_set = spans
        .iter()
        .all(|&(block, from, to)| doc.blocks[block].range_all(from, to, |s| mark.is_set(s)));
    for (block, from, to) in spans {
        doc.blocks[block].restyle_range(from, to, |s| mark.set(s, !all_set));
    }
    FormatOutcome::changed(selection)
}

/// Applies `color` as background, or strips all formatting when the run at the
/// selection start already carries exactly that color.
pub(super) fn highlight(doc: &mut Document, selection: Selection, color: &str) -> FormatOutcome {
    let color = color.trim();
    let spans = non_empty_spans(doc, selection);
    if color.is_empty() || selection.is_collapsed() || spans.is_empty() {
        return FormatOutcome::unchanged(selection);
    }

    let start = selection.start();
    let enclosing = doc.blocks[start.block].style_at(start.offset);
    let already = enclosing
        .highlight
        .as_deref()
        .is_some_and(|current| current.eq_ignore_ascii_case(color));

    for (block, from, to) in spans {
        doc.blocks[block].restyle_range(from, to, |s| {
            if already {
                *s = s.without_formatting();
            } else {
                s.highlight = Some(color.to_string());
            }
        });
    }
    FormatOutcome::changed(selection)
}

pub(super) fn insert_link(doc: &mut Document, selection: Selection, url: &str) -> FormatOutcome {
    let url = url.trim();
    if url.is_empty() {
        return FormatOutcome::unchanged(selection);
    }

    if selection.is_collapsed() {
        let pos = selection.cursor();
        let block = &mut doc.blocks[pos.block];
        let mut style = block.typing_style_at(pos.offset);
        style.link = Some(url.to_string());
        block.insert_text(pos.offset, url, style);
        let end = TextPosition::new(pos.block, pos.offset + url.chars().count());
        return FormatOutcome::changed(Selection::caret(end));
    }

    let spans = non_empty_spans(doc, selection);
    if spans.is_empty() {
        return FormatOutcome::unchanged(selection);
    }
    for (block, from, to) in spans {
        doc.blocks[block].restyle_range(from, to, |s| s.link = Some(url.to_string()));
    }
    FormatOutcome::changed(selection)
}
