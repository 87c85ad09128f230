//! One editor tab: document, language, highlighter and console

use std::fmt;

use crate::document::Document;
use crate::language::LanguageSpec;
use crate::syntax::Highlighter;

use super::messages::RunResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Append-only output sink of one tab
#[derive(Debug, Clone, Default)]
pub struct Console {
    text: String,
}

impl Console {
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text appended after byte offset `offset`
    pub fn since(&self, offset: usize) -> &str {
        self.text.get(offset..).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[derive(Debug)]
pub struct Tab {
    pub id: TabId,
    pub document: Document,
    pub language: LanguageSpec,
    pub highlighter: Highlighter,
    pub console: Console,
    /// Bumped on every run; messages from older generations are dropped
    pub(super) generation: u64,
    pub(super) running: bool,
    pub(super) last_result: Option<RunResult>,
}

impl Tab {
    pub(super) fn new(id: TabId, document: Document, language: LanguageSpec) -> Self {
        Self {
            id,
            document,
            highlighter: Highlighter::new(&language),
            language,
            console: Console::default(),
            generation: 0,
            running: false,
            last_result: None,
        }
    }

    /// Title shown on the tab
    pub fn title(&self) -> String {
        let name = self.document.display_name(self.language.extension);
        if self.document.is_modified {
            format!("{} •", name)
        } else {
            name
        }
    }

    pub fn is_untitled(&self) -> bool {
        self.document.file_path.is_none()
    }

    /// Whether the latest run is still producing output
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Result of the latest finished run
    pub fn last_result(&self) -> Option<&RunResult> {
        self.last_result.as_ref()
    }
}
