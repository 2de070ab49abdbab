//! Word-level cancellation between two texts.

use std::collections::HashMap;

/// Remove one occurrence of every word the two texts share.
///
/// Both texts are split on whitespace. For each word present in both, exactly
/// one occurrence is dropped from each side; surplus occurrences survive.
/// The remaining words keep their original order and are rejoined with single
/// spaces.
///
/// Case is preserved: callers lowercase first if they want case-insensitive
/// cancellation.
pub fn cancel_common_words(a: &str, b: &str) -> (String, String) {
    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();

    let mut counts_a = word_counts(&words_a);
    let mut counts_b = word_counts(&words_b);

    let shared: Vec<&str> = counts_a
        .keys()
        .filter(|w| counts_b.contains_key(*w))
        .copied()
        .collect();
    for word in shared {
        decrement(&mut counts_a, word);
        decrement(&mut counts_b, word);
    }

    (
        rebuild(&words_a, &mut counts_a),
        rebuild(&words_b, &mut counts_b),
    )
}

fn word_counts<'a>(words: &[&'a str]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::with_capacity(words.len());
    for &w in words {
        *counts.entry(w).or_insert(0) += 1;
    }
    counts
}

fn decrement(counts: &mut HashMap<&str, usize>, word: &str) {
    if let Some(n) = counts.get_mut(word) {
        *n = n.saturating_sub(1);
    }
}

/// Emit words in original order while their remaining budget lasts.
///
/// Budgets are consumed front to back, so the dropped occurrence of a shared
/// word is always its last one.
fn rebuild(words: &[&str], counts: &mut HashMap<&str, usize>) -> String {
    let mut kept = Vec::with_capacity(words.len());
    for &w in words {
        if let Some(n) = counts.get_mut(w) {
            if *n > 0 {
                kept.push(w);
                *n -= 1;
            }
        }
    }
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_words_removed() {
        let (a, b) = cancel_common_words("the cat sat", "the dog sat");
        assert_eq!(a, "cat");
        assert_eq!(b, "dog");
    }

    #[test]
    fn test_one_occurrence_per_shared_word() {
        let (a, b) = cancel_common_words("cat cat dog", "cat");
        assert_eq!(a, "cat dog");
        assert_eq!(b, "");
    }

    #[test]
    fn test_repeated_on_both_sides_cancels_once() {
        let (a, b) = cancel_common_words("cat cat", "cat cat");
        assert_eq!(a, "cat");
        assert_eq!(b, "cat");

        let (a, b) = cancel_common_words("xyz cat cat", "cat cat cab");
        assert_eq!(a, "xyz cat");
        assert_eq!(b, "cat cab");
    }

    #[test]
    fn test_order_preserved() {
        let (a, b) = cancel_common_words("z y x w", "w q y");
        assert_eq!(a, "z x");
        assert_eq!(b, "q");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let (a, b) = cancel_common_words("  one\t two\n three ", "four");
        assert_eq!(a, "one two three");
        assert_eq!(b, "four");
    }

    #[test]
    fn test_case_sensitive() {
        let (a, b) = cancel_common_words("Cat", "cat");
        assert_eq!(a, "Cat");
        assert_eq!(b, "cat");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(cancel_common_words("", ""), (String::new(), String::new()));
        assert_eq!(
            cancel_common_words("", "a b"),
            (String::new(), "a b".to_owned())
        );
    }
}
