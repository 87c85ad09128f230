//! Incremental highlighter
//!
//! Drives the tokenizer over a document one block at a time. Edits mark the
//! blocks they touched; `refresh` re-classifies only those, so the work per
//! keystroke is proportional to the edited blocks, not the document.
//!
//! Blocks are scanned independently. A `/* ... */` or `<!-- ... -->` comment
//! that spans several blocks is therefore not recognised block-by-block;
//! `highlight_document` scans the whole text when that matters.

use std::collections::BTreeSet;

use super::highlights::BlockHighlights;
use super::tokenizer::{TokenSpan, Tokenizer};
use crate::document::{BlockEdit, Document};
use crate::language::LanguageSpec;

#[derive(Debug, Clone)]
pub struct Highlighter {
    language: &'static str,
    tokenizer: Tokenizer,
    cache: BlockHighlights,
    dirty: BTreeSet<usize>,
    /// Set by a language switch: every block must be re-classified
    full_pending: bool,
}

impl Highlighter {
    pub fn new(spec: &LanguageSpec) -> Self {
        Self {
            language: spec.id,
            tokenizer: Tokenizer::for_language(spec),
            cache: BlockHighlights::new(spec.id, 0),
            dirty: BTreeSet::new(),
            full_pending: true,
        }
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Rebuild the rule list and force a full re-highlight
    pub fn set_language(&mut self, spec: &LanguageSpec) {
        tracing::debug!("Highlighter language {} -> {}", self.language, spec.id);
        self.language = spec.id;
        self.tokenizer = Tokenizer::for_language(spec);
        self.cache = BlockHighlights::new(spec.id, self.cache.revision);
        self.dirty.clear();
        self.full_pending = true;
    }

    /// Spans for one changed block. Pure: nothing is cached.
    pub fn on_block_changed(&self, block_text: &str) -> Vec<TokenSpan> {
        self.tokenizer.classify(block_text)
    }

    /// Record an edit; the touched blocks are re-classified on next `refresh`
    pub fn note_edit(&mut self, edit: BlockEdit) {
        self.cache
            .shift_for_edit(edit.block, edit.old_block_count, edit.new_block_count);

        // Dirty indices after the edit point move with the blocks
        let delta = edit.new_block_count as isize - edit.old_block_count as isize;
        if delta != 0 {
            self.dirty = self
                .dirty
                .iter()
                .filter_map(|&block| {
                    if block <= edit.block {
                        Some(block)
                    } else {
                        let moved = block as isize + delta;
                        (moved > edit.block as isize).then_some(moved as usize)
                    }
                })
                .collect();
        }
        self.dirty.extend(edit.touched());
    }

    /// Force a full re-highlight on the next refresh
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.dirty.clear();
        self.full_pending = true;
    }

    /// Re-classify pending blocks of `doc`. Returns the block indices whose
    /// spans were recomputed, in ascending order.
    pub fn refresh(&mut self, doc: &Document) -> Vec<usize> {
        let block_count = doc.block_count();

        let pending: Vec<usize> = if self.full_pending {
            self.cache.clear();
            (0..block_count).collect()
        } else {
            self.dirty
                .iter()
                .copied()
                .filter(|&block| block < block_count)
                .collect()
        };

        for &block in &pending {
            let spans = self.on_block_changed(&doc.block_text(block));
            self.cache.set(block, spans);
        }

        // Blocks past the end belong to text that no longer exists
        self.cache.blocks.retain(|&block, _| block < block_count);
        self.cache.revision = doc.revision;
        self.dirty.clear();
        self.full_pending = false;

        pending
    }

    pub fn highlights(&self) -> &BlockHighlights {
        &self.cache
    }

    pub fn spans(&self, block: usize) -> &[TokenSpan] {
        self.cache.spans(block)
    }

    /// Cached spans of every block, shifted to byte offsets in `doc`.
    /// Call after `refresh` so the cache matches the text.
    pub fn document_spans(&self, doc: &Document) -> Vec<TokenSpan> {
        let mut spans = Vec::new();
        for block in 0..doc.block_count() {
            let base = doc.buffer.line_to_byte(block);
            spans.extend(
                self.spans(block)
                    .iter()
                    .map(|span| TokenSpan::new(base + span.start, span.len, span.category)),
            );
        }
        spans
    }

    /// Whole-document scan; catches comments that cross block boundaries
    pub fn highlight_document(&self, text: &str) -> Vec<TokenSpan> {
        self.tokenizer.classify(text)
    }
}
