//! Syntax highlighting module
//!
//! Regex rule based highlighting with:
//! - Per-language rule lists built from the language registry
//! - Ordered compositing (later rules paint over earlier ones)
//! - Incremental per-block re-highlighting driven by document edits
//!
//! ## Architecture
//!
//! ```text
//! Document edit → BlockEdit → Highlighter::note_edit (shift cache, mark dirty)
//!              → Highlighter::refresh → Tokenizer::classify (dirty blocks only)
//!              → BlockHighlights → host repaint
//! ```
//!
//! ## Compositing order
//!
//! keywords → strings → numbers → call targets → comments

mod highlighter;
mod highlights;
mod rules;
mod tokenizer;

pub use highlighter::Highlighter;
pub use highlights::BlockHighlights;
pub use rules::{build_rules, HighlightRule, TokenCategory};
pub use tokenizer::{classify, TokenSpan, Tokenizer};
