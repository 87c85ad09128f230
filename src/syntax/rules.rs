//! Highlight rule construction
//!
//! A language's rules are built in a fixed compositing order:
//! keywords, strings, numbers, call targets, comments. Later rules paint over
//! earlier ones, so comments always win inside their span.

use regex::Regex;
use serde::Serialize;

use crate::language::{CommentSyntax, LanguageSpec};

/// What a highlighted span represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Keyword,
    String,
    Number,
    CallTarget,
    Comment,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 5] = [
        TokenCategory::Keyword,
        TokenCategory::String,
        TokenCategory::Number,
        TokenCategory::CallTarget,
        TokenCategory::Comment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::String => "string",
            TokenCategory::Number => "number",
            TokenCategory::CallTarget => "call_target",
            TokenCategory::Comment => "comment",
        }
    }
}

/// A compiled pattern and the category it paints
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pattern: Regex,
    category: TokenCategory,
    /// Capture group that forms the span (0 = whole match)
    group: usize,
}

impl HighlightRule {
    pub fn new(pattern: &str, category: TokenCategory) -> Result<Self, regex::Error> {
        Self::with_group(pattern, category, 0)
    }

    /// Rule whose span is a capture group rather than the whole match.
    /// Used to emulate lookahead, which `regex` does not support.
    pub fn with_group(
        pattern: &str,
        category: TokenCategory,
        group: usize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            category,
            group,
        })
    }

    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Non-overlapping byte ranges this rule paints in `text`
    pub fn find_ranges<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, usize)> + 't {
        self.pattern
            .captures_iter(text)
            .filter_map(move |caps| caps.get(self.group))
            .filter(|m| !m.is_empty())
            .map(|m| (m.start(), m.end()))
    }
}

const DOUBLE_QUOTED: &str = r#""[^"\\]*(\\.[^"\\]*)*""#;
const SINGLE_QUOTED: &str = r#"'[^'\\]*(\\.[^'\\]*)*'"#;
const NUMBER: &str = r"\b\d+\.?\d*\b";
/// Identifier immediately followed by `(`; group 1 excludes the paren
const CALL_TARGET: &str = r"\b([A-Za-z_][A-Za-z0-9_]*)\(";

const HASH_COMMENT: &str = r"#[^\n]*";
const DASH_COMMENT: &str = r"--[^\n]*";
const SLASH_COMMENT: &str = r"//[^\n]*";
const C_BLOCK_COMMENT: &str = r"(?s)/\*.*?\*/";
const MARKUP_COMMENT: &str = r"(?s)<!--.*?-->";

fn comment_patterns(syntax: CommentSyntax) -> &'static [&'static str] {
    match syntax {
        CommentSyntax::Hash => &[HASH_COMMENT],
        CommentSyntax::DoubleDash => &[DASH_COMMENT],
        CommentSyntax::CFamily => &[SLASH_COMMENT, C_BLOCK_COMMENT],
        CommentSyntax::Markup => &[MARKUP_COMMENT],
        CommentSyntax::Stylesheet => &[C_BLOCK_COMMENT],
    }
}

fn push_rule(rules: &mut Vec<HighlightRule>, result: Result<HighlightRule, regex::Error>) {
    match result {
        Ok(rule) => rules.push(rule),
        Err(e) => tracing::warn!("Skipping highlight rule that failed to compile: {}", e),
    }
}

/// Build the ordered rule list for a language
pub fn build_rules(spec: &LanguageSpec) -> Vec<HighlightRule> {
    let mut rules = Vec::with_capacity(spec.keywords.len() + 6);

    for word in spec.keywords {
        let pattern = format!(r"\b{}\b", regex::escape(word));
        push_rule(&mut rules, HighlightRule::new(&pattern, TokenCategory::Keyword));
    }

    push_rule(&mut rules, HighlightRule::new(DOUBLE_QUOTED, TokenCategory::String));
    push_rule(&mut rules, HighlightRule::new(SINGLE_QUOTED, TokenCategory::String));
    push_rule(&mut rules, HighlightRule::new(NUMBER, TokenCategory::Number));
    push_rule(
        &mut rules,
        HighlightRule::with_group(CALL_TARGET, TokenCategory::CallTarget, 1),
    );

    for pattern in comment_patterns(spec.comment) {
        push_rule(&mut rules, HighlightRule::new(pattern, TokenCategory::Comment));
    }

    tracing::debug!("Built {} highlight rules for {}", rules.len(), spec.id);
    rules
}
