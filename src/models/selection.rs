//! Selection over the block/run document model.
//!
//! Positions are `(block, offset)` pairs where `offset` counts chars inside the
//! block's concatenated run text. The anchor stays put while the cursor moves,
//! so an extended selection may be "backwards"; use [`Selection::range`] for
//! the ordered bounds.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    pub block: usize,
    pub offset: usize,
}

impl TextPosition {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: TextPosition,
    cursor: TextPosition,
}

impl Selection {
    pub fn new(anchor: TextPosition, cursor: TextPosition) -> Self {
        Self { anchor, cursor }
    }

    pub fn caret(pos: TextPosition) -> Self {
        Self::new(pos, pos)
    }

    /// Selection of `[start, end)` inside a single block.
    pub fn within(block: usize, start: usize, end: usize) -> Self {
        Self::new(TextPosition::new(block, start), TextPosition::new(block, end))
    }

    pub fn anchor(&self) -> TextPosition {
        self.anchor
    }

    pub fn cursor(&self) -> TextPosition {
        self.cursor
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.cursor
    }

    pub fn start(&self) -> TextPosition {
        self.range().0
    }

    pub fn end(&self) -> TextPosition {
        self.range().1
    }

    pub fn range(&self) -> (TextPosition, TextPosition) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    /// Same bounds, anchor first.
    pub fn normalized(&self) -> Self {
        let (start, end) = self.range();
        Self::new(start, end)
    }

    pub fn with_cursor(&self, cursor: TextPosition) -> Self {
        Self::new(self.anchor, cursor)
    }

    pub fn contains(&self, pos: TextPosition) -> bool {
        let (start, end) = self.range();
        start <= pos && pos < end
    }

    pub fn touches_block(&self, block: usize) -> bool {
        let (start, end) = self.range();
        start.block <= block && block <= end.block
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/selection.rs"]
mod tests;
