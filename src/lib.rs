//! Mocha - run and highlight source files in many languages
//!
//! Two table-driven subsystems share the language registry:
//! - `exec`: saved file → strategy → compile → bounded background run
//! - `syntax`: regex rules per language, composited in a fixed order and
//!   re-applied only to edited blocks
//!
//! `session` ties them to editable tabs for a foreground host.

pub mod cli;
pub mod completion;
pub mod config;
pub mod config_paths;
pub mod document;
pub mod error;
pub mod exec;
pub mod language;
pub mod session;
pub mod syntax;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::MochaConfig;
pub use document::Document;
pub use error::{Error, Result};
pub use exec::{Dispatch, Dispatcher, ExecutionStrategy, RunOutcome};
pub use language::{LanguageRegistry, LanguageSpec};
pub use session::{Session, TabId};
pub use syntax::{Highlighter, TokenCategory, TokenSpan};
pub use theme::Theme;
