//! Completion candidates
//!
//! Candidates are the language keywords plus every identifier of three or
//! more characters already in the document, sorted and de-duplicated.
//! Matching against the typed prefix is case-insensitive.

use std::collections::BTreeSet;

/// Prefix length at which completion pops up without being asked
pub const AUTO_TRIGGER_LEN: usize = 2;

const MIN_WORD_LEN: usize = 3;

/// ASCII identifiers of at least `MIN_WORD_LEN` chars, delimited by
/// non-word characters
fn document_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !is_word_char(ch)).filter(|word| {
        word.len() >= MIN_WORD_LEN
            && word.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
            && !word.as_bytes()[0].is_ascii_digit()
    })
}

/// Sorted union of `keywords` and the identifiers found in `text`
pub fn vocabulary(keywords: &[&str], text: &str) -> Vec<String> {
    let mut words: BTreeSet<&str> = keywords.iter().copied().collect();
    words.extend(document_words(text));
    words.into_iter().map(str::to_string).collect()
}

/// Vocabulary entries starting with `prefix`, ignoring case. The prefix
/// itself is left out when it is already a complete word.
pub fn candidates(keywords: &[&str], text: &str, prefix: &str) -> Vec<String> {
    let wanted = prefix.to_lowercase();
    vocabulary(keywords, text)
        .into_iter()
        .filter(|word| word.to_lowercase().starts_with(&wanted) && word != prefix)
        .collect()
}

/// The identifier fragment ending at char column `column` of `line`
pub fn word_before(line: &str, column: usize) -> &str {
    let end = line
        .char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    let start = line[..end]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_word_char(*ch))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(end);
    &line[start..end]
}

/// Whether typing has produced a prefix long enough to show completions
pub fn should_auto_trigger(prefix: &str) -> bool {
    prefix.chars().count() >= AUTO_TRIGGER_LEN
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_merges_keywords_and_document_words() {
        let words = vocabulary(&["def", "return"], "def greet(name):\n    return name\n");
        assert_eq!(words, vec!["def", "greet", "name", "return"]);
    }

    #[test]
    fn test_short_words_are_skipped() {
        let words = vocabulary(&[], "a = ab + abc");
        assert_eq!(words, vec!["abc"]);
    }

    #[test]
    fn test_candidates_case_insensitive() {
        let found = candidates(&["print", "pass"], "Printer = 1\n", "PR");
        assert_eq!(found, vec!["Printer", "print"]);
    }

    #[test]
    fn test_candidates_exclude_exact_prefix() {
        let found = candidates(&["for", "format"], "", "for");
        assert_eq!(found, vec!["format"]);
    }

    #[test]
    fn test_word_before() {
        assert_eq!(word_before("    self.con", 12), "con");
        assert_eq!(word_before("foo(bar", 7), "bar");
        assert_eq!(word_before("foo bar", 3), "foo");
        assert_eq!(word_before("foo ", 4), "");
        assert_eq!(word_before("", 0), "");
    }

    #[test]
    fn test_should_auto_trigger() {
        assert!(!should_auto_trigger("p"));
        assert!(should_auto_trigger("pr"));
    }
}
