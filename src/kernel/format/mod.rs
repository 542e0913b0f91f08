//! Formatting and editing commands over the document model.
//!
//! Every command is a pure function of `(&mut Document, Selection)` that returns
//! whether the document changed and where the selection ends up. The store
//! re-renders markup from the document after each change.

mod block;
mod edit;
mod inline;

use crate::models::{Document, HeadingLevel, Selection};

pub use edit::{apply_edit, EditCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFormat {
    H1,
    H2,
    H3,
    Paragraph,
}

impl BlockFormat {
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            BlockFormat::H1 => Some(HeadingLevel::H1),
            BlockFormat::H2 => Some(HeadingLevel::H2),
            BlockFormat::H3 => Some(HeadingLevel::H3),
            BlockFormat::Paragraph => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    InsertUnorderedList,
    InsertOrderedList,
    SetBlockFormat(BlockFormat),
    InsertLink(String),
    InsertCodeBlock,
    Highlight(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOutcome {
    pub changed: bool,
    pub selection: Selection,
}

impl FormatOutcome {
    pub fn unchanged(selection: Selection) -> Self {
        Self {
            changed: false,
            selection,
        }
    }

    pub fn changed(selection: Selection) -> Self {
        Self {
            changed: true,
            selection,
        }
    }
}

pub fn apply(doc: &mut Document, selection: Selection, command: &FormatCommand) -> FormatOutcome {
    let selection = doc.clamp_selection(selection);
    match command {
        FormatCommand::ToggleBold => inline::toggle_mark(doc, selection, inline::Mark::Bold),
        FormatCommand::ToggleItalic => inline::toggle_mark(doc, selection, inline::Mark::Italic),
        FormatCommand::ToggleUnderline => {
            inline::toggle_mark(doc, selection, inline::Mark::Underline)
        }
        FormatCommand::Highlight(color) => inline::highlight(doc, selection, color),
        FormatCommand::InsertLink(url) => inline::insert_link(doc, selection, url),
        FormatCommand::InsertUnorderedList => {
            block::toggle_list(doc, selection, crate::models::ListKind::Unordered)
        }
        FormatCommand::InsertOrderedList => {
            block::toggle_list(doc, selection, crate::models::ListKind::Ordered)
        }
        FormatCommand::SetBlockFormat(format) => block::set_block_format(doc, selection, format),
        FormatCommand::InsertCodeBlock => block::toggle_code_block(doc, selection),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/format/mod.rs"]
mod tests;
