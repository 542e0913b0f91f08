use super::{BlockFormat, FormatOutcome};
use crate::models::{Block, BlockKind, Document, ListKind, Selection, TextPosition};

fn touched_blocks(selection: Selection) -> std::ops::RangeInclusive<usize> {
    let (start, end) = selection.range();
    start.block..=end.block
}

pub(super) fn toggle_list(doc: &mut Document, selection: Selection, kind: ListKind) -> FormatOutcome {
    let selection = isolate_emphasized_run(doc, selection).unwrap_or(selection);
    let target = BlockKind::ListItem(kind);
    let all_listed = touched_blocks(selection).all(|index| doc.blocks[index].kind == target);

    for index in touched_blocks(selection) {
        doc.blocks[index].kind = if all_listed {
            BlockKind::Paragraph
        } else {
            target
        };
    }
    FormatOutcome::changed(selection)
}

/// When the selection sits inside a bold or highlighted run of a block that is
/// not a list item, lift that run into a block of its own so the list command
/// turns it into a list item intact. Text before the run stays in the original
/// block; text after it moves into a following block of the original kind.
fn isolate_emphasized_run(doc: &mut Document, selection: Selection) -> Option<Selection> {
    let (start, end) = selection.range();
    if start.block != end.block {
        return None;
    }

    let index = start.block;
    let block = &doc.blocks[index];
    if block.kind.list_kind().is_some() {
        return None;
    }

    let (run, span) = block.run_span_at(start.offset)?;
    if !block.runs[run].style.is_emphasized() || end.offset > span.end {
        return None;
    }
    if span.start == 0 && span.end == block.len() {
        return None;
    }

    let kind = block.kind;
    let block = &mut doc.blocks[index];
    let tail = block.split_off(span.end);
    let lifted = block.split_off(span.start);
    let head_kept = !block.is_empty();

    let mut insert_at = index;
    if head_kept {
        insert_at += 1;
    } else {
        doc.blocks.remove(index);
    }
    doc.blocks
        .insert(insert_at, Block::with_runs(BlockKind::Paragraph, lifted));
    if !tail.is_empty() {
        doc.blocks
            .insert(insert_at + 1, Block::with_runs(kind, tail));
    }

    Some(Selection::new(
        TextPosition::new(insert_at, start.offset - span.start),
        TextPosition::new(insert_at, end.offset - span.start),
    ))
}

pub(super) fn set_block_format(
    doc: &mut Document,
    selection: Selection,
    format: &BlockFormat,
) -> FormatOutcome {
    let kind = match format.heading_level() {
        Some(level) => BlockKind::Heading(level),
        None => BlockKind::Paragraph,
    };
    let mut changed = false;
    for index in touched_blocks(selection) {
        let block = &mut doc.blocks[index];
        if block.kind != kind {
            block.kind = kind;
            changed = true;
        }
    }
    FormatOutcome {
        changed,
        selection,
    }
}

pub(super) fn toggle_code_block(doc: &mut Document, selection: Selection) -> FormatOutcome {
    let all_code = touched_blocks(selection).all(|index| doc.blocks[index].kind == BlockKind::CodeBlock);
    for index in touched_blocks(selection) {
        doc.blocks[index].kind = if all_code {
            BlockKind::Paragraph
        } else {
            BlockKind::CodeBlock
        };
    }
    FormatOutcome::changed(selection)
}
