//! Language registry
//!
//! Static, closed set of languages. Each entry carries everything other
//! components need to know about a language:
//! - canonical file extension (reverse lookup when opening files)
//! - comment family (selects comment highlight rules)
//! - keyword table (highlighting and completion)
//! - starter template for new tabs
//! - execution strategy

pub mod keywords;
mod registry;
pub mod samples;

pub use registry::{CommentSyntax, LanguageRegistry, LanguageSpec};
