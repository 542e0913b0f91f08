//! Rich-text document model: a flat list of typed blocks, each holding styled runs.

use std::ops::Range;

use super::selection::{Selection, TextPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }

    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading(HeadingLevel),
    ListItem(ListKind),
    CodeBlock,
}

impl BlockKind {
    pub fn list_kind(self) -> Option<ListKind> {
        match self {
            BlockKind::ListItem(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub highlight: Option<String>,
    pub link: Option<String>,
}

impl InlineStyle {
    pub fn is_plain(&self) -> bool {
        *self == InlineStyle::default()
    }

    /// Drops character formatting; links are structure, not formatting, and survive.
    pub fn without_formatting(&self) -> Self {
        Self {
            link: self.link.clone(),
            ..Self::default()
        }
    }

    pub fn is_emphasized(&self) -> bool {
        self.bold || self.highlight.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: InlineStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, InlineStyle::default())
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub runs: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            runs: Vec::new(),
        }
    }

    pub fn with_runs(kind: BlockKind, runs: Vec<Run>) -> Self {
        let mut block = Self { kind, runs };
        block.normalize();
        block
    }

    pub fn paragraph(text: &str) -> Self {
        Self::with_runs(BlockKind::Paragraph, vec![Run::plain(text)])
    }

    pub fn len(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Drops empty runs and merges neighbours that share a style.
    pub fn normalize(&mut self) {
        let runs = std::mem::take(&mut self.runs);
        for run in runs {
            if run.is_empty() {
                continue;
            }
            match self.runs.last_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => self.runs.push(run),
            }
        }
    }

    /// Run index and char span of the run holding the char at `offset`.
    /// A caret at the very end of the block resolves to the last run.
    pub fn run_span_at(&self, offset: usize) -> Option<(usize, Range<usize>)> {
        let mut pos = 0;
        for (index, run) in self.runs.iter().enumerate() {
            let len = run.len();
            if offset < pos + len {
                return Some((index, pos..pos + len));
            }
            pos += len;
        }
        let last = self.runs.len().checked_sub(1)?;
        let len = self.runs[last].len();
        (offset == pos).then(|| (last, pos - len..pos))
    }

    pub fn style_at(&self, offset: usize) -> InlineStyle {
        self.run_span_at(offset)
            .map(|(index, _)| self.runs[index].style.clone())
            .unwrap_or_default()
    }

    /// Style new text typed at `offset` inherits: the char before it, else the char after.
    pub fn typing_style_at(&self, offset: usize) -> InlineStyle {
        if offset > 0 {
            self.style_at(offset - 1)
        } else {
            self.style_at(0)
        }
    }

    /// Ensures a run boundary at `offset` and returns the index of the first run
    /// starting there (`runs.len()` when `offset` is at or past the end).
    pub fn split_at(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for index in 0..self.runs.len() {
            if offset == pos {
                return index;
            }
            let len = self.runs[index].len();
            if offset < pos + len {
                let byte = byte_index(&self.runs[index].text, offset - pos);
                let tail = self.runs[index].text.split_off(byte);
                let style = self.runs[index].style.clone();
                self.runs.insert(index + 1, Run::new(tail, style));
                return index + 1;
            }
            pos += len;
        }
        self.runs.len()
    }

    /// Removes and returns every run after `offset`.
    pub fn split_off(&mut self, offset: usize) -> Vec<Run> {
        let index = self.split_at(offset);
        let tail = self.runs.split_off(index);
        self.normalize();
        tail
    }

    pub fn insert_text(&mut self, offset: usize, text: &str, style: InlineStyle) {
        if text.is_empty() {
            return;
        }
        let offset = offset.min(self.len());
        let index = self.split_at(offset);
        self.runs.insert(index, Run::new(text, style));
        self.normalize();
    }

    pub fn remove_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        if start >= end {
            return;
        }
        let first = self.split_at(start);
        let last = self.split_at(end);
        self.runs.drain(first..last);
        self.normalize();
    }

    pub fn append_runs(&mut self, runs: Vec<Run>) {
        self.runs.extend(runs);
        self.normalize();
    }

    pub fn restyle_range(&mut self, start: usize, end: usize, mut f: impl FnMut(&mut InlineStyle)) {
        let end = end.min(self.len());
        if start >= end {
            return;
        }
        let first = self.split_at(start);
        let last = self.split_at(end);
        for run in &mut self.runs[first..last] {
            f(&mut run.style);
        }
        self.normalize();
    }

    /// True when every char in `[start, end)` satisfies `pred`. Empty ranges are false.
    pub fn range_all(&self, start: usize, end: usize, pred: impl Fn(&InlineStyle) -> bool) -> bool {
        if start >= end {
            return false;
        }
        let mut pos = 0;
        for run in &self.runs {
            let len = run.len();
            let overlaps = pos < end && start < pos + len;
            if overlaps && !pred(&run.style) {
                return false;
            }
            pos += len;
        }
        start < pos
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            blocks: vec![Block::new(BlockKind::Paragraph)],
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::default();
        }
        Self { blocks }
    }

    /// A single empty paragraph: what a fresh article holds.
    pub fn is_blank(&self) -> bool {
        matches!(self.blocks.as_slice(), [only] if only.kind == BlockKind::Paragraph && only.is_empty())
    }

    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn end_position(&self) -> TextPosition {
        let last = self.blocks.len().saturating_sub(1);
        TextPosition::new(last, self.blocks.get(last).map(Block::len).unwrap_or(0))
    }

    pub fn clamp_position(&self, pos: TextPosition) -> TextPosition {
        if self.blocks.is_empty() {
            return TextPosition::default();
        }
        let block = pos.block.min(self.blocks.len() - 1);
        TextPosition::new(block, pos.offset.min(self.blocks[block].len()))
    }

    pub fn clamp_selection(&self, selection: Selection) -> Selection {
        Selection::new(
            self.clamp_position(selection.anchor()),
            self.clamp_position(selection.cursor()),
        )
    }

    /// Per-block `(block, start, end)` char spans covered by `selection`.
    pub fn block_spans(&self, selection: Selection) -> Vec<(usize, usize, usize)> {
        let (start, end) = self.clamp_selection(selection).range();
        (start.block..=end.block)
            .map(|index| {
                let from = if index == start.block { start.offset } else { 0 };
                let to = if index == end.block {
                    end.offset
                } else {
                    self.blocks[index].len()
                };
                (index, from, to)
            })
            .collect()
    }

    /// Index range of the contiguous list that `index` belongs to.
    pub fn list_bounds(&self, index: usize) -> Option<Range<usize>> {
        let kind = self.blocks.get(index)?.kind.list_kind()?;
        let same = |i: usize| self.blocks[i].kind == BlockKind::ListItem(kind);
        let mut start = index;
        while start > 0 && same(start - 1) {
            start -= 1;
        }
        let mut end = index + 1;
        while end < self.blocks.len() && same(end) {
            end += 1;
        }
        Some(start..end)
    }
}

pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
