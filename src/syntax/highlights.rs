//! Per-block highlight cache
//!
//! Holds the spans last computed for each block (line) of a document so the
//! highlighter only has to revisit blocks an edit touched.

use std::collections::HashMap;

use super::rules::TokenCategory;
use super::tokenizer::TokenSpan;

/// Spans for every highlighted block of one document
#[derive(Debug, Clone)]
pub struct BlockHighlights {
    /// Map of block index (0-indexed) → spans sorted by start
    pub blocks: HashMap<usize, Vec<TokenSpan>>,
    /// Document revision these spans correspond to
    pub revision: u64,
    /// Language the spans were computed with
    pub language: &'static str,
}

impl BlockHighlights {
    pub fn new(language: &'static str, revision: u64) -> Self {
        Self {
            blocks: HashMap::new(),
            revision,
            language,
        }
    }

    pub fn contains(&self, block: usize) -> bool {
        self.blocks.contains_key(&block)
    }

    /// Spans for a block, or empty slice if none
    pub fn spans(&self, block: usize) -> &[TokenSpan] {
        self.blocks
            .get(&block)
            .map(|spans| spans.as_slice())
            .unwrap_or(&[])
    }

    /// Category painted at a byte offset of a block, if any
    pub fn category_at(&self, block: usize, offset: usize) -> Option<TokenCategory> {
        for span in self.spans(block) {
            if span.contains(offset) {
                return Some(span.category);
            }
            if span.start > offset {
                break; // spans are sorted
            }
        }
        None
    }

    pub fn set(&mut self, block: usize, spans: Vec<TokenSpan>) {
        self.blocks.insert(block, spans);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Shift cached blocks to account for an edit so untouched blocks keep
    /// their spans.
    ///
    /// - `edit_block`: the block where the edit occurred
    /// - `old_block_count` / `new_block_count`: document block counts around the edit
    ///
    /// Insertions shift later blocks down, deletions drop the removed blocks and
    /// shift the rest up. The edit block itself is always dropped, as are
    /// blocks newly created by the insertion; those are the blocks left to
    /// re-highlight.
    pub fn shift_for_edit(
        &mut self,
        edit_block: usize,
        old_block_count: usize,
        new_block_count: usize,
    ) {
        let delta = new_block_count as isize - old_block_count as isize;
        if delta == 0 {
            self.blocks.remove(&edit_block);
            return;
        }

        let mut shifted = HashMap::with_capacity(self.blocks.len());
        for (block, spans) in self.blocks.drain() {
            if block < edit_block {
                shifted.insert(block, spans);
            } else if delta > 0 {
                if block > edit_block {
                    shifted.insert((block as isize + delta) as usize, spans);
                }
            } else {
                let deleted = (-delta) as usize;
                if block > edit_block + deleted {
                    shifted.insert((block as isize + delta) as usize, spans);
                }
            }
        }

        self.blocks = shifted;
    }
}
