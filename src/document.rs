//! Document model - the text buffer of one editor tab
//!
//! Blocks are the buffer's lines. Edits report which blocks they touched so
//! the highlighter can stay incremental.

use ropey::Rope;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Blocks affected by one edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    /// Block where the edit started
    pub block: usize,
    pub old_block_count: usize,
    pub new_block_count: usize,
}

impl BlockEdit {
    /// Blocks whose text may differ after the edit
    pub fn touched(&self) -> std::ops::RangeInclusive<usize> {
        let inserted = self.new_block_count.saturating_sub(self.old_block_count);
        self.block..=self.block + inserted
    }
}

/// Text buffer and file state
#[derive(Debug, Clone)]
pub struct Document {
    pub buffer: Rope,
    /// Path on disk (None for untitled documents)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Incremented on each edit
    pub revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_text("")
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            is_modified: false,
            revision: 0,
        }
    }

    pub fn from_file(path: PathBuf) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::io("read", path.clone(), e))?;
        Ok(Self {
            buffer: Rope::from(content),
            file_path: Some(path),
            is_modified: false,
            revision: 0,
        })
    }

    pub fn block_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Text of a block without its line ending
    pub fn block_text(&self, block: usize) -> String {
        if block >= self.block_count() {
            return String::new();
        }
        let mut line = self.buffer.line(block).to_string();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        line
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Replace the whole buffer (template loads, reloads)
    pub fn set_text(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.is_modified = true;
        self.revision += 1;
    }

    /// Insert text at a char index (clamped to the buffer end)
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BlockEdit {
        let char_idx = char_idx.min(self.buffer.len_chars());
        let block = self.buffer.char_to_line(char_idx);
        let old_block_count = self.block_count();
        self.buffer.insert(char_idx, text);
        self.touch();
        BlockEdit {
            block,
            old_block_count,
            new_block_count: self.block_count(),
        }
    }

    /// Delete a char range (clamped to the buffer)
    pub fn delete(&mut self, range: std::ops::Range<usize>) -> BlockEdit {
        let len = self.buffer.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        let block = self.buffer.char_to_line(start);
        let old_block_count = self.block_count();
        self.buffer.remove(start..end);
        self.touch();
        BlockEdit {
            block,
            old_block_count,
            new_block_count: self.block_count(),
        }
    }

    fn touch(&mut self) {
        self.is_modified = true;
        self.revision += 1;
    }

    /// Name for tab titles and console messages
    pub fn display_name(&self, extension: &str) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("untitled{}", extension))
    }

    /// Save to `path` (or the current path), forcing the language extension.
    /// Returns the path actually written.
    pub fn save(&mut self, path: Option<&Path>, extension: &str) -> Result<PathBuf> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => self
                .file_path
                .clone()
                .ok_or_else(|| Error::Unsaved(self.display_name(extension)))?,
        };
        let target = with_language_extension(&target, extension);

        std::fs::write(&target, self.text()).map_err(|e| Error::io("write", target.clone(), e))?;
        tracing::info!("Saved {}", target.display());

        self.file_path = Some(target.clone());
        self.is_modified = false;
        Ok(target)
    }
}

/// Rewrite the suffix of `path` when it differs from `extension` (".py")
pub fn with_language_extension(path: &Path, extension: &str) -> PathBuf {
    let wanted = extension.trim_start_matches('.');
    if wanted.is_empty() {
        return path.to_path_buf();
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(current) if current == wanted => path.to_path_buf(),
        _ => path.with_extension(wanted),
    }
}
