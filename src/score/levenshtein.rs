//! Levenshtein edit distance.
//!
//! Used by [`smart`](super::smart) on the residual characters left after
//! word cancellation.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. Operates on
/// `char`s, so multi-byte characters count as one edit each.
///
/// Only two rows of the DP table are kept; the shorter input becomes the row
/// so the working set is `O(min(m, n))`.
pub fn distance(a: &str, b: &str) -> usize {
    let mut long: Vec<char> = a.chars().collect();
    let mut short: Vec<char> = b.chars().collect();
    if long.len() < short.len() {
        std::mem::swap(&mut long, &mut short);
    }
    let m = long.len();
    let n = short.len();

    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(long[i - 1] != short[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
