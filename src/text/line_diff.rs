//! Line-aligned diff that reduces an old/new text pair to changed fragments.
//!
//! Lines are compared pairwise by index. For each pair that differs, the common
//! prefix and suffix are stripped and what remains in the middle becomes one
//! [`Replacement`]. Only indices present in both texts are compared: lines added
//! or removed at the end of either side produce nothing.
//!
//! A fragment that was already recorded keeps its first replacement; a later
//! line mapping the same old fragment to different text is ignored.
//!
//! ## Word snapping
//!
//! Raw prefix/suffix boundaries often cut through a word: `Invoice #100` versus
//! `Invoice #200` differ only in the `1`, and searching a page for `1` matches far
//! more than intended. By default the boundaries are widened to the enclosing word
//! whenever the cut falls between two alphanumeric characters, which turns that
//! example into `100` → `200`. The widening only covers characters shared by both
//! lines, so the result is still a substring of each line.
//!
//! Snapping also changes two other cases, on purpose:
//!
//! - An edit inside a word replaces the whole word: `colour` → `color` yields
//!   `colour`/`color`, not `u`/``.
//! - A pure insertion inside or at the end of a word is no longer skipped. Raw
//!   boundaries leave an empty old fragment there (nothing to search for), while
//!   snapping widens it to the word, so `abc` → `abcd` yields `abc`/`abcd`.
//!   Insertions between words (`a b` → `a x b`) still produce nothing.
//!
//! Use [`LineDiffer::character_level`] to keep the raw boundaries.

use crate::editor::Replacement;
use indexmap::IndexMap;

/// Computes per-line fragment replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDiffer {
    snap_to_words: bool,
}

impl Default for LineDiffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDiffer {
    /// Differ with word snapping enabled.
    pub fn new() -> Self {
        Self {
            snap_to_words: true,
        }
    }

    /// Differ that keeps the raw character boundaries.
    pub fn character_level() -> Self {
        Self {
            snap_to_words: false,
        }
    }

    /// Enable or disable word snapping.
    pub fn with_word_snapping(mut self, enable: bool) -> Self {
        self.snap_to_words = enable;
        self
    }

    /// Diff `old` against `new`.
    ///
    /// Returns replacements in the order their old fragment was first seen,
    /// deduplicated by old fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retext::text::LineDiffer;
    ///
    /// let changes = LineDiffer::new().diff("Invoice #100\nDue: May", "Invoice #200\nDue: May");
    /// assert_eq!(changes.len(), 1);
    /// assert_eq!(changes[0].old_fragment, "100");
    /// assert_eq!(changes[0].new_fragment, "200");
    /// ```
    pub fn diff(&self, old: &str, new: &str) -> Vec<Replacement> {
        if old.trim() == new.trim() {
            return Vec::new();
        }

        let mut changes: IndexMap<String, String> = IndexMap::new();
        for (old_line, new_line) in old.split('\n').zip(new.split('\n')) {
            let old_line = old_line.trim();
            let new_line = new_line.trim();
            if old_line == new_line || old_line.is_empty() || new_line.is_empty() {
                continue;
            }

            let (old_fragment, new_fragment) = self.changed_fragment(old_line, new_line);
            if !old_fragment.is_empty() {
                changes.entry(old_fragment).or_insert(new_fragment);
            }
        }

        log::debug!("Line diff produced {} fragment replacements", changes.len());
        changes
            .into_iter()
            .map(|(old_fragment, new_fragment)| Replacement::new(old_fragment, new_fragment))
            .collect()
    }

    /// The differing middle of two lines, each side trimmed.
    fn changed_fragment(&self, old_line: &str, new_line: &str) -> (String, String) {
        let old: Vec<char> = old_line.chars().collect();
        let new: Vec<char> = new_line.chars().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let suffix = common_suffix(&old[prefix..], &new[prefix..]);

        let mut start = prefix;
        let mut old_end = old.len() - suffix;
        let mut new_end = new.len() - suffix;

        if self.snap_to_words {
            let inside_word_at = |i: usize| {
                (i < old_end && is_word_char(old[i])) || (i < new_end && is_word_char(new[i]))
            };
            while start > 0 && is_word_char(old[start - 1]) && inside_word_at(start) {
                start -= 1;
            }

            while old_end < old.len()
                && is_word_char(old[old_end])
                && ((old_end > start && is_word_char(old[old_end - 1]))
                    || (new_end > start && is_word_char(new[new_end - 1])))
            {
                old_end += 1;
                new_end += 1;
            }
        }

        (
            collect_trimmed(&old[start..old_end]),
            collect_trimmed(&new[start..new_end]),
        )
    }
}

/// Length of the common suffix, never reaching past the shorter slice.
fn common_suffix(old: &[char], new: &[char]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

fn collect_trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(changes: &[Replacement]) -> Vec<(&str, &str)> {
        changes
            .iter()
            .map(|r| (r.old_fragment.as_str(), r.new_fragment.as_str()))
            .collect()
    }

    #[test]
    fn test_identical_text_is_noop() {
        let differ = LineDiffer::new();
        assert!(differ.diff("", "").is_empty());
        assert!(differ.diff("Hello\nWorld", "Hello\nWorld").is_empty());
        assert!(differ.diff("  Hello\nWorld\n\n", "Hello\nWorld").is_empty());
    }

    #[test]
    fn test_invoice_number_snaps_to_word() {
        let changes = LineDiffer::new().diff("Invoice #100", "Invoice #200");
        assert_eq!(pairs(&changes), vec![("100", "200")]);
    }

    #[test]
    fn test_invoice_number_character_level() {
        let changes = LineDiffer::character_level().diff("Invoice #100", "Invoice #200");
        assert_eq!(pairs(&changes), vec![("1", "2")]);
    }

    #[test]
    fn test_snapping_does_not_cross_punctuation() {
        let changes = LineDiffer::new().diff("a, b", "a; b");
        assert_eq!(pairs(&changes), vec![(",", ";")]);
    }

    #[test]
    fn test_in_word_deletion() {
        assert_eq!(
            pairs(&LineDiffer::new().diff("The colour red", "The color red")),
            vec![("colour", "color")]
        );
        assert_eq!(
            pairs(&LineDiffer::character_level().diff("The colour red", "The color red")),
            vec![("u", "")]
        );
    }

    #[test]
    fn test_insertion_inside_word_becomes_word_replacement() {
        assert_eq!(
            pairs(&LineDiffer::new().diff("Item abc", "Item abcd")),
            vec![("abc", "abcd")]
        );
        assert!(LineDiffer::character_level()
            .diff("Item abc", "Item abcd")
            .is_empty());
    }

    #[test]
    fn test_insertion_between_words_is_skipped() {
        assert!(LineDiffer::new().diff("a b", "a x b").is_empty());
    }

    #[test]
    fn test_leading_word_removed() {
        let changes = LineDiffer::new().diff("Grand Total: 5", "Total: 5");
        assert_eq!(pairs(&changes), vec![("Grand", "")]);
    }

    #[test]
    fn test_suffix_bounded_by_prefix() {
        // Without the bound the suffix "aa" would overlap the prefix "aa".
        let changes = LineDiffer::character_level().diff("aaa", "aaaa");
        assert!(changes.is_empty());

        let changes = LineDiffer::character_level().diff("abab", "ab");
        assert_eq!(pairs(&changes), vec![("ab", "")]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let changes = LineDiffer::new().diff("Price 10\nQty 10\nTax 4", "Price 20\nQty 30\nTax 5");
        assert_eq!(pairs(&changes), vec![("10", "20"), ("4", "5")]);
    }

    #[test]
    fn test_only_aligned_lines_compared() {
        let changes = LineDiffer::new().diff("alpha\nbeta\ngamma", "alpha\nBeta");
        assert_eq!(pairs(&changes), vec![("beta", "Beta")]);

        let changes = LineDiffer::new().diff("alpha", "alpha\nnew line");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let changes = LineDiffer::new().diff("x\n\ny", "x\ninserted\ny");
        assert!(changes.is_empty());

        let changes = LineDiffer::new().diff("x\nremoved\ny", "x\n   \ny");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_whitespace_only_line_change_is_skipped() {
        let changes = LineDiffer::new().diff("  Name: Bob\nAge: 40", "Name: Bob  \nAge: 41");
        assert_eq!(pairs(&changes), vec![("40", "41")]);
    }

    #[test]
    fn test_unicode_positions() {
        let changes = LineDiffer::new().diff("Größe: 12 cm", "Größe: 14 cm");
        assert_eq!(pairs(&changes), vec![("12", "14")]);

        let changes = LineDiffer::new().diff("Prix : 5 €", "Prix : 5 $");
        assert_eq!(pairs(&changes), vec![("€", "$")]);
    }

    #[test]
    fn test_crlf_lines() {
        let changes = LineDiffer::new().diff("Dear Ann,\r\nThanks", "Dear Bob,\r\nThanks");
        assert_eq!(pairs(&changes), vec![("Ann", "Bob")]);
    }
}
