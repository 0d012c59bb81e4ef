//! Grapheme-level word splitting.
//!
//! A word that does not fit in the space left on the line is cut at a
//! grapheme cluster boundary. The kept prefix leaves one column free for a
//! hyphen, which is added only when the clusters on both sides of the cut
//! start with a letter or number: `abc|def` becomes `abc-`, while `abc.|def`
//! is cut without one.

use stringwrap_core::WidthPolicy;
use unicode_segmentation::UnicodeSegmentation;

/// Where to cut a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cut {
    /// Byte length of the prefix that stays on the current line.
    pub(crate) len: usize,
    /// Visual width of that prefix.
    pub(crate) width: usize,
    /// Append a hyphen after the prefix.
    pub(crate) hyphenate: bool,
}

/// True if the cluster starts with a letter or number.
#[inline]
fn is_wordy(cluster: &str) -> bool {
    cluster.chars().next().is_some_and(char::is_alphanumeric)
}

/// Find the cut point for a word that overflows a line already holding
/// `line_width` columns.
///
/// Clusters are kept while the kept width, the line width and the width of
/// the next cluster stay below `limit`; the last cluster of the word is
/// never kept, so the remainder is never empty. When nothing fits on an
/// empty line the first cluster is taken anyway, so every call on an empty
/// line consumes at least one cluster.
pub(crate) fn find_cut(word: &str, line_width: usize, limit: usize, policy: WidthPolicy) -> Cut {
    let mut len = 0;
    let mut width = 0;
    let mut before: Option<&str> = None;
    let mut after: Option<&str> = None;

    let mut clusters = word.graphemes(true).peekable();
    while let Some(cluster) = clusters.next() {
        let cluster_width = policy.grapheme_width(cluster);
        if clusters.peek().is_none() || width + line_width + cluster_width >= limit {
            after = Some(cluster);
            break;
        }
        len += cluster.len();
        width += cluster_width;
        before = Some(cluster);
    }

    if len == 0 && line_width == 0 {
        return forced_cut(word, policy);
    }

    Cut {
        len,
        width,
        hyphenate: before.is_some_and(is_wordy) && after.is_some_and(is_wordy),
    }
}

/// Take the first cluster of a word whose leading cluster alone reaches the
/// limit. It already fills the line, so no hyphen is added.
fn forced_cut(word: &str, policy: WidthPolicy) -> Cut {
    let first = word.graphemes(true).next().unwrap_or_default();
    Cut {
        len: first.len(),
        width: policy.grapheme_width(first),
        hyphenate: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: WidthPolicy = WidthPolicy::Standard;

    fn cut_str(word: &str, line_width: usize, limit: usize) -> (&str, bool) {
        let cut = find_cut(word, line_width, limit, P);
        (&word[..cut.len], cut.hyphenate)
    }

    #[test]
    fn leaves_room_for_hyphen() {
        assert_eq!(
            cut_str("Supercalifragilisticexpialidocious", 0, 10),
            ("Supercali", true)
        );
    }

    #[test]
    fn accounts_for_line_width() {
        assert_eq!(cut_str("medical", 13, 15), ("m", true));
        assert_eq!(cut_str("word", 7, 10), ("wo", true));
    }

    #[test]
    fn no_hyphen_next_to_punctuation() {
        assert_eq!(cut_str("abc.def", 0, 5), ("abc.", false));
        assert_eq!(cut_str("abc.defgh", 0, 4), ("abc", false));
    }

    #[test]
    fn full_line_keeps_nothing() {
        let cut = find_cut("ab", 9, 10, P);
        assert_eq!(cut.len, 0);
        assert!(!cut.hyphenate);
    }

    #[test]
    fn combining_mark_stays_with_base() {
        assert_eq!(cut_str("e\u{0301}clair", 0, 2), ("e\u{0301}", true));
    }

    #[test]
    fn last_cluster_never_kept() {
        let cut = find_cut("abc", 0, 3, P);
        assert_eq!(cut.len, 2);
        assert!(cut.len < "abc".len());
    }

    #[test]
    fn wide_cluster_is_forced_on_empty_line() {
        let word = "\u{6F22}\u{5B57}";
        let cut = find_cut(word, 0, 2, P);
        assert_eq!(&word[..cut.len], "\u{6F22}");
        assert_eq!(cut.width, 2);
        // The hyphen would push the line past the limit.
        assert!(!cut.hyphenate);
    }

    #[test]
    fn wide_cluster_kept_normally_when_limit_allows() {
        let word = "\u{6F22}\u{5B57}";
        let cut = find_cut(word, 0, 3, P);
        // 0 + 0 + 2 < 3 keeps the first cluster; the second is the last one.
        assert_eq!(cut.len, word.len() / 2);
        assert!(cut.hyphenate);
    }

    #[test]
    fn forced_cut_never_hyphenates() {
        let word = "\u{6F22}ab";
        let cut = find_cut(word, 0, 2, P);
        assert_eq!(&word[..cut.len], "\u{6F22}");
        assert_eq!(cut.width, 2);
        assert!(!cut.hyphenate);
    }
}
