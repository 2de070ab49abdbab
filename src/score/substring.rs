//! Longest common substring ("longest match").
//!
//! Brute-force scan over every pair of start offsets. Inputs are short
//! captions, so the `O(n * m * L)` worst case is acceptable and no table is
//! kept. This is a contiguous match; see [`lcs`](super::lcs) for the
//! subsequence variant.

/// Return the longest contiguous run of characters shared by `a` and `b`.
///
/// Both inputs are lowercased first. Start offsets in `a` and `b` are
/// independent. On ties the first run found wins, scanning `a` offsets
/// outermost, then `b` offsets. Returns an empty string when either input is
/// empty or no character is shared.
pub fn longest_match(a: &str, b: &str) -> String {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let mut best_start = 0;
    let mut best_len = 0;

    for i in 0..a.len() {
        for j in 0..b.len() {
            let mut len = 0;
            while i + len < a.len() && j + len < b.len() && a[i + len] == b[j + len] {
                len += 1;
                if len > best_len {
                    best_len = len;
                    best_start = j;
                }
            }
        }
    }

    b[best_start..best_start + best_len].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_match() {
        assert_eq!(longest_match("hello world", "yellow"), "ello");
    }

    #[test]
    fn test_offsets_are_independent() {
        assert_eq!(longest_match("xxabcd", "abcdyy"), "abcd");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(longest_match("The CAT", "a cat sat"), " cat");
    }

    #[test]
    fn test_first_found_wins_on_tie() {
        // "ab" and "cd" are both length 2; "ab" starts first in `a`.
        assert_eq!(longest_match("ab cd", "cd ab"), "ab");
    }

    #[test]
    fn test_empty_and_disjoint() {
        assert_eq!(longest_match("", "abc"), "");
        assert_eq!(longest_match("abc", ""), "");
        assert_eq!(longest_match("abc", "xyz"), "");
    }

    #[test]
    fn test_not_a_subsequence() {
        // "ace" is a common subsequence, but the longest contiguous run is one char.
        assert_eq!(longest_match("abcde", "axcye").chars().count(), 1);
    }
}
