//! Word-aware edit distance.
//!
//! Credits exact shared vocabulary before counting character edits, so
//! reordered or partially truncated texts that share most words stay close.

use super::levenshtein;
use super::tokens::cancel_common_words;

/// Edit distance between `a` and `b` after cancelling shared words.
///
/// Both texts are lowercased, one occurrence of each shared word is removed
/// from both sides, the remaining whitespace is stripped and the residual
/// characters are compared with [`levenshtein::distance`]. Returns 0 when
/// cancellation consumes both texts entirely.
pub fn smart_distance(a: &str, b: &str) -> usize {
    let (rest_a, rest_b) = cancel_common_words(&a.to_lowercase(), &b.to_lowercase());
    if rest_a.is_empty() && rest_b.is_empty() {
        return 0;
    }

    let rest_a = strip_spaces(&rest_a);
    let rest_b = strip_spaces(&rest_b);
    levenshtein::distance(&rest_a, &rest_b)
}

// Rebuilt texts are single-space joined, so spaces are the only separators left.
fn strip_spaces(s: &str) -> String {
    s.replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        assert_eq!(smart_distance("the cat sat", "the cat sat"), 0);
    }

    #[test]
    fn test_reordered_words_cost_nothing() {
        assert_eq!(smart_distance("sat the cat", "the cat sat"), 0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(smart_distance("The CAT", "the cat"), 0);
    }

    #[test]
    fn test_residual_distance() {
        assert_eq!(smart_distance("hello world", "hello globe"), 5);
        assert_eq!(smart_distance("the cat sat", "the bat sat"), 1);
    }

    #[test]
    fn test_residual_ignores_word_boundaries() {
        // "ab cd" vs "abcd": no shared word, spaces stripped, equal residue.
        assert_eq!(smart_distance("ab cd", "abcd"), 0);
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(smart_distance("", "abc def"), 6);
        assert_eq!(smart_distance("abc", ""), 3);
        assert_eq!(smart_distance("", ""), 0);
    }

    #[test]
    fn test_surplus_occurrence_counts() {
        // One "cat" cancels, the second remains on the left.
        assert_eq!(smart_distance("cat cat", "cat"), 3);
    }

    #[test]
    fn test_repeated_shared_word_leaves_one_copy_each() {
        // Residues "catx" / "caty".
        assert_eq!(smart_distance("cat cat x", "cat cat y"), 1);
        // Residues "xyzcat" / "catcab"; cancelling every shared copy would give
        // "xyz" / "cab" and a distance of 3.
        assert_eq!(smart_distance("xyz cat cat", "cat cat cab"), 4);
        assert_eq!(smart_distance("cat cat", "cat cat"), 0);
    }
}
