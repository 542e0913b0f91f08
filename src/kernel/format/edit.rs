use super::FormatOutcome;
use crate::models::{Block, BlockKind, Document, Selection, TextPosition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    InsertText(String),
    InsertNewline,
    Backspace,
    MoveLeft { extend: bool },
    MoveRight { extend: bool },
    MoveUp { extend: bool },
    MoveDown { extend: bool },
    MoveLineStart { extend: bool },
    MoveLineEnd { extend: bool },
    SelectAll,
}

impl EditCommand {
    /// Movement commands never touch the document.
    pub fn is_motion(&self) -> bool {
        !matches!(
            self,
            EditCommand::InsertText(_) | EditCommand::InsertNewline | EditCommand::Backspace
        )
    }
}

pub fn apply_edit(doc: &mut Document, selection: Selection, command: &EditCommand) -> FormatOutcome {
    let selection = doc.clamp_selection(selection);
    match command {
        EditCommand::InsertText(text) => insert_text(doc, selection, text),
        EditCommand::InsertNewline => {
            let pos = delete_selection(doc, selection);
            FormatOutcome::changed(Selection::caret(insert_newline(doc, pos)))
        }
        EditCommand::Backspace => backspace(doc, selection),
        EditCommand::MoveLeft { extend } => motion(doc, selection, *extend, Motion::Left),
        EditCommand::MoveRight { extend } => motion(doc, selection, *extend, Motion::Right),
        EditCommand::MoveUp { extend } => motion(doc, selection, *extend, Motion::Up),
        EditCommand::MoveDown { extend } => motion(doc, selection, *extend, Motion::Down),
        EditCommand::MoveLineStart { extend } => motion(doc, selection, *extend, Motion::Start),
        EditCommand::MoveLineEnd { extend } => motion(doc, selection, *extend, Motion::End),
        EditCommand::SelectAll => FormatOutcome::unchanged(Selection::new(
            TextPosition::default(),
            doc.end_position(),
        )),
    }
}

/// Removes the selected range and returns the collapsed position left behind.
fn delete_selection(doc: &mut Document, selection: Selection) -> TextPosition {
    let (start, end) = selection.range();
    if start == end {
        return start;
    }

    if start.block == end.block {
        doc.blocks[start.block].remove_range(start.offset, end.offset);
        return start;
    }

    let tail = doc.blocks[end.block].split_off(end.offset);
    doc.blocks.drain(start.block + 1..=end.block);
    let first = &mut doc.blocks[start.block];
    first.split_off(start.offset);
    first.append_runs(tail);
    start
}

fn insert_text(doc: &mut Document, selection: Selection, text: &str) -> FormatOutcome {
    if text.is_empty() {
        return FormatOutcome::unchanged(selection);
    }

    let mut pos = delete_selection(doc, selection);
    let in_code = doc.blocks[pos.block].kind == BlockKind::CodeBlock;
    let normalized = text.replace("\r\n", "\n");

    if in_code {
        pos = insert_in_block(doc, pos, &normalized);
    } else {
        for (index, line) in normalized.split('\n').enumerate() {
            if index > 0 {
                pos = insert_newline(doc, pos);
            }
            pos = insert_in_block(doc, pos, line);
        }
    }
    FormatOutcome::changed(Selection::caret(pos))
}

fn insert_in_block(doc: &mut Document, pos: TextPosition, text: &str) -> TextPosition {
    let block = &mut doc.blocks[pos.block];
    let style = block.typing_style_at(pos.offset);
    block.insert_text(pos.offset, text, style);
    TextPosition::new(pos.block, pos.offset + text.chars().count())
}

fn insert_newline(doc: &mut Document, pos: TextPosition) -> TextPosition {
    match doc.blocks[pos.block].kind {
        BlockKind::CodeBlock => insert_in_block(doc, pos, "\n"),
        BlockKind::ListItem(_) if doc.blocks[pos.block].is_empty() => {
            doc.blocks[pos.block].kind = BlockKind::Paragraph;
            pos
        }
        kind => {
            let tail = doc.blocks[pos.block].split_off(pos.offset);
            let next_kind = match kind {
                BlockKind::Heading(_) => BlockKind::Paragraph,
                other => other,
            };
            doc.blocks
                .insert(pos.block + 1, Block::with_runs(next_kind, tail));
            TextPosition::new(pos.block + 1, 0)
        }
    }
}

fn backspace(doc: &mut Document, selection: Selection) -> FormatOutcome {
    if !selection.is_collapsed() {
        let pos = delete_selection(doc, selection);
        return FormatOutcome::changed(Selection::caret(pos));
    }

    let pos = selection.cursor();
    if pos.offset > 0 {
        doc.blocks[pos.block].remove_range(pos.offset - 1, pos.offset);
        return FormatOutcome::changed(Selection::caret(TextPosition::new(
            pos.block,
            pos.offset - 1,
        )));
    }

    let index = pos.block;
    let kind = doc.blocks[index].kind;
    if let Some(bounds) = doc.list_bounds(index) {
        if !doc.blocks[index].is_empty() || bounds.len() == 1 {
            // Outdent: the item leaves the list; a sole empty item leaves no list behind.
            doc.blocks[index].kind = BlockKind::Paragraph;
            return FormatOutcome::changed(selection);
        }
        doc.blocks.remove(index);
        let caret = if index > bounds.start {
            TextPosition::new(index - 1, doc.blocks[index - 1].len())
        } else {
            TextPosition::new(index, 0)
        };
        return FormatOutcome::changed(Selection::caret(caret));
    }

    if index == 0 {
        if kind == BlockKind::Paragraph {
            return FormatOutcome::unchanged(selection);
        }
        doc.blocks[0].kind = BlockKind::Paragraph;
        return FormatOutcome::changed(selection);
    }

    let removed = doc.blocks.remove(index);
    let previous = &mut doc.blocks[index - 1];
    let caret = TextPosition::new(index - 1, previous.len());
    previous.append_runs(removed.runs);
    FormatOutcome::changed(Selection::caret(caret))
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Left,
    Right,
    Up,
    Down,
    Start,
    End,
}

fn motion(doc: &Document, selection: Selection, extend: bool, motion: Motion) -> FormatOutcome {
    if !extend && !selection.is_collapsed() {
        match motion {
            Motion::Left => return FormatOutcome::unchanged(Selection::caret(selection.start())),
            Motion::Right => return FormatOutcome::unchanged(Selection::caret(selection.end())),
            _ => {}
        }
    }

    let cursor = selection.cursor();
    let moved = match motion {
        Motion::Left => {
            if cursor.offset > 0 {
                TextPosition::new(cursor.block, cursor.offset - 1)
            } else if cursor.block > 0 {
                TextPosition::new(cursor.block - 1, doc.blocks[cursor.block - 1].len())
            } else {
                cursor
            }
        }
        Motion::Right => {
            if cursor.offset < doc.blocks[cursor.block].len() {
                TextPosition::new(cursor.block, cursor.offset + 1)
            } else if cursor.block + 1 < doc.blocks.len() {
                TextPosition::new(cursor.block + 1, 0)
            } else {
                cursor
            }
        }
        Motion::Up if cursor.block > 0 => TextPosition::new(cursor.block - 1, cursor.offset),
        Motion::Up => TextPosition::new(0, 0),
        Motion::Down if cursor.block + 1 < doc.blocks.len() => {
            TextPosition::new(cursor.block + 1, cursor.offset)
        }
        Motion::Down => doc.end_position(),
        Motion::Start => TextPosition::new(cursor.block, 0),
        Motion::End => TextPosition::new(cursor.block, doc.blocks[cursor.block].len()),
    };
    let moved = doc.clamp_position(moved);

    let next = if extend {
        selection.with_cursor(moved)
    } else {
        Selection::caret(moved)
    };
    FormatOutcome::unchanged(next)
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/format/edit.rs"]
mod tests;
