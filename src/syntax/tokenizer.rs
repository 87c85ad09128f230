//! Rule-based tokenizer
//!
//! Applies a language's rules in order and composites the results into a
//! per-byte category buffer. A later rule overwrites an earlier one wherever
//! their spans overlap; the buffer is then collapsed back into spans.

use std::sync::Arc;

use serde::Serialize;

use super::rules::{build_rules, HighlightRule, TokenCategory};
use crate::language::LanguageSpec;

/// A classified byte range of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenSpan {
    /// Byte offset where the span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    pub category: TokenCategory,
}

impl TokenSpan {
    pub fn new(start: usize, len: usize, category: TokenCategory) -> Self {
        Self {
            start,
            len,
            category,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// The text this span covers
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end()]
    }
}

/// Classifies text with a fixed, shared rule list
#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: Arc<[HighlightRule]>,
}

impl Tokenizer {
    pub fn new(rules: Vec<HighlightRule>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    pub fn for_language(spec: &LanguageSpec) -> Self {
        Self::new(build_rules(spec))
    }

    /// Tokenizer with no rules; classifies nothing
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// Raw spans in scan order: every match of every rule, before compositing.
    /// Spans from different rules may overlap.
    pub fn matches(&self, text: &str) -> Vec<TokenSpan> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.find_ranges(text)
                    .map(move |(start, end)| TokenSpan::new(start, end - start, rule.category()))
            })
            .collect()
    }

    /// Composited spans, ordered by start offset and non-overlapping
    pub fn classify(&self, text: &str) -> Vec<TokenSpan> {
        if text.is_empty() || self.rules.is_empty() {
            return Vec::new();
        }

        let mut paint: Vec<Option<TokenCategory>> = vec![None; text.len()];
        for rule in self.rules.iter() {
            let category = rule.category();
            for (start, end) in rule.find_ranges(text) {
                paint[start..end].fill(Some(category));
            }
        }

        collapse(&paint)
    }
}

/// Merge runs of equal categories into spans
fn collapse(paint: &[Option<TokenCategory>]) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut run: Option<(usize, TokenCategory)> = None;

    for (offset, slot) in paint.iter().enumerate() {
        match (run, *slot) {
            (Some((_, current)), Some(category)) if current == category => {}
            (Some((start, current)), next) => {
                spans.push(TokenSpan::new(start, offset - start, current));
                run = next.map(|category| (offset, category));
            }
            (None, next) => run = next.map(|category| (offset, category)),
        }
    }

    if let Some((start, category)) = run {
        spans.push(TokenSpan::new(start, paint.len() - start, category));
    }

    spans
}

/// Classify `text` with the rules of `language`
pub fn classify(text: &str, language: &LanguageSpec) -> Vec<TokenSpan> {
    Tokenizer::for_language(language).classify(text)
}
