//! Longest common subsequence, returned as a string.
//!
//! Two interchangeable strategies implement [`LcsStrategy`]:
//!
//! - [`TableLcs`] keeps the whole subsequence in every DP cell. Cells share
//!   their common prefixes as linked `Link` chains, and only two rows are
//!   alive at once.
//! - [`BacktraceLcs`] keeps only lengths and walks back once from the
//!   bottom-right cell.
//!
//! Both lowercase their inputs and break ties identically, so they return the
//! same string for every input pair.
//!
//! # Tie-breaking
//!
//! On a mismatch at `(i, j)` the cell for prefixes `(a[..i-1], b[..j])`
//! (dropping the last char of `a`) wins unless the cell for
//! `(a[..i], b[..j-1])` is strictly longer.

use std::rc::Rc;
use std::str::FromStr;

/// Computes the longest common subsequence of two texts.
pub trait LcsStrategy: Send + Sync {
    /// Return the LCS of `a` and `b`, compared case-insensitively.
    fn lcs(&self, a: &str, b: &str) -> String;
}

/// One character of a cell's subsequence, linked to the cell it extends.
struct Link {
    ch: char,
    len: usize,
    prev: Option<Rc<Link>>,
}

impl Drop for Link {
    // Unlink iteratively; long chains would otherwise recurse once per char.
    fn drop(&mut self) {
        let mut next = self.prev.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut link) => next = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

type Cell = Option<Rc<Link>>;

fn cell_len(cell: &Cell) -> usize {
    cell.as_ref().map_or(0, |l| l.len)
}

fn cell_string(cell: &Cell) -> String {
    let mut chars = Vec::with_capacity(cell_len(cell));
    let mut cur = cell.as_deref();
    while let Some(link) = cur {
        chars.push(link.ch);
        cur = link.prev.as_deref();
    }
    chars.iter().rev().collect()
}

/// Subsequence-per-cell DP table, two rows at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLcs;

impl LcsStrategy for TableLcs {
    fn lcs(&self, a: &str, b: &str) -> String {
        let a: Vec<char> = a.to_lowercase().chars().collect();
        let b: Vec<char> = b.to_lowercase().chars().collect();
        let n = b.len();

        // prev[j] is the cell (i, j), curr[j] the cell (i + 1, j).
        let mut prev: Vec<Cell> = vec![None; n + 1];
        let mut curr: Vec<Cell> = vec![None; n + 1];
        for &ca in &a {
            for j in 0..n {
                curr[j + 1] = if ca == b[j] {
                    Some(Rc::new(Link {
                        ch: ca,
                        len: cell_len(&prev[j]) + 1,
                        prev: prev[j].clone(),
                    }))
                } else if cell_len(&curr[j]) > cell_len(&prev[j + 1]) {
                    curr[j].clone()
                } else {
                    prev[j + 1].clone()
                };
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        cell_string(&prev[n])
    }
}

/// Length table plus a single backtrace pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceLcs;

impl LcsStrategy for BacktraceLcs {
    fn lcs(&self, a: &str, b: &str) -> String {
        let a: Vec<char> = a.to_lowercase().chars().collect();
        let b: Vec<char> = b.to_lowercase().chars().collect();
        let (m, n) = (a.len(), b.len());

        let mut len = vec![vec![0usize; n + 1]; m + 1];
        for i in 0..m {
            for j in 0..n {
                len[i + 1][j + 1] = if a[i] == b[j] {
                    len[i][j] + 1
                } else {
                    len[i + 1][j].max(len[i][j + 1])
                };
            }
        }

        let mut out = Vec::with_capacity(len[m][n]);
        let (mut i, mut j) = (m, n);
        while i > 0 && j > 0 {
            if a[i - 1] == b[j - 1] {
                out.push(a[i - 1]);
                i -= 1;
                j -= 1;
            } else if len[i][j - 1] > len[i - 1][j] {
                j -= 1;
            } else {
                i -= 1;
            }
        }

        out.iter().rev().collect()
    }
}

/// Selects an [`LcsStrategy`] by name in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LcsStrategyKind {
    #[default]
    Table,
    Backtrace,
}

impl LcsStrategyKind {
    /// Box the strategy this kind names.
    pub fn build(self) -> Box<dyn LcsStrategy> {
        match self {
            Self::Table => Box::new(TableLcs),
            Self::Backtrace => Box::new(BacktraceLcs),
        }
    }
}

impl FromStr for LcsStrategyKind {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "table" => Ok(Self::Table),
            "backtrace" => Ok(Self::Backtrace),
            other => Err(format!(
                "unknown LCS strategy {other:?} (expected \"table\" or \"backtrace\")"
            )),
        }
    }
}

impl<L: LcsStrategy + ?Sized> LcsStrategy for Box<L> {
    fn lcs(&self, a: &str, b: &str) -> String {
        (**self).lcs(a, b)
    }
}

/// LCS with the default [`TableLcs`] strategy.
pub fn lcs(a: &str, b: &str) -> String {
    TableLcs.lcs(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: &[(&str, &str)] = &[
        ("", ""),
        ("abc", ""),
        ("ABCBDAB", "BDCABA"),
        ("ab", "ba"),
        ("stop", "tops"),
        ("The Quick Brown Fox", "the quikc brwn fx"),
        ("aaaa", "aa"),
        ("héllo", "hello"),
        ("abcabc", "cbacba"),
    ];

    #[test]
    fn test_classic() {
        assert_eq!(lcs("ABCBDAB", "BDCABA").len(), 4);
    }

    #[test]
    fn test_empty() {
        assert_eq!(lcs("", "abc"), "");
        assert_eq!(lcs("abc", ""), "");
    }

    #[test]
    fn test_identity_is_lowercase() {
        assert_eq!(lcs("Hello World", "Hello World"), "hello world");
    }

    #[test]
    fn test_tie_prefers_shortening_left_operand() {
        // Both "a" and "b" are length-1 answers; the walk keeps the one
        // reached by dropping chars of the left operand first.
        assert_eq!(lcs("ab", "ba"), "a");
        assert_eq!(lcs("ba", "ab"), "b");
    }

    #[test]
    fn test_strategies_agree() {
        for (a, b) in PAIRS {
            assert_eq!(TableLcs.lcs(a, b), BacktraceLcs.lcs(a, b), "pair ({a:?}, {b:?})");
            assert_eq!(TableLcs.lcs(b, a), BacktraceLcs.lcs(b, a), "pair ({b:?}, {a:?})");
        }
    }

    #[test]
    fn test_kind_parse_and_build() {
        assert_eq!("table".parse::<LcsStrategyKind>(), Ok(LcsStrategyKind::Table));
        assert_eq!("backtrace".parse::<LcsStrategyKind>(), Ok(LcsStrategyKind::Backtrace));
        assert!("fast".parse::<LcsStrategyKind>().is_err());
        assert_eq!(LcsStrategyKind::Backtrace.build().lcs("stop", "tops"), "top");
    }

    #[test]
    fn test_long_pair() {
        let a = "ab".repeat(1500);
        let b = "ba".repeat(1500);
        let table = TableLcs.lcs(&a, &b);
        assert_eq!(table.len(), 2999);
        assert_eq!(table, BacktraceLcs.lcs(&a, &b));
    }

    #[test]
    fn test_lopsided_pair() {
        let a = "x".repeat(200_000);
        assert_eq!(TableLcs.lcs(&a, "xx"), "xx");
        assert_eq!(TableLcs.lcs("xx", &a), "xx");
    }
}
