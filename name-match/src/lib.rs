//! Fuzzy name matching.
//!
//! Scores candidate names against a target with a Ratcliff/Obershelp style
//! sequence matcher and picks the best one. Everything here is pure and
//! allocation-light, so it is safe to call from any number of tasks at once.
//!
//! # Example
//! ```
//! use name_match::best_match;
//!
//! let names = ["Jon Smith", "John Smith", "Jane Doe"];
//! let found = best_match(&names, "john smith").unwrap();
//! assert_eq!(found.item, "John Smith");
//! assert_eq!(found.index, 1);
//! assert_eq!(found.score, 1.0);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error type for matching operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("No candidates were supplied")]
    EmptyInput,

    #[error("No item with a name similar to '{target}' was found")]
    NoMatch { target: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequence Matcher
// ─────────────────────────────────────────────────────────────────────────────

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of equal elements: `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Compares two sequences by recursively finding their longest common runs.
///
/// The longest matching block is located first, then the same search is
/// repeated on the pieces to its left and right. The similarity ratio is
/// `2 * M / T` where `M` is the number of matched elements and `T` the total
/// number of elements in both sequences.
pub struct SequenceMatcher<'a, T: Eq + Hash> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Creates a matcher for the pair `(a, b)`.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elem) in b.iter().enumerate() {
            b2j.entry(elem).or_default().push(j);
        }

        // Very frequent elements in long sequences would seed huge numbers of
        // tiny matches; they may still extend a match but never start one.
        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Finds the longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties resolve to the block starting earliest in `a`, then earliest in `b`.
    /// Returns a zero-length block at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchingBlock {
            a_start: best_i,
            b_start: best_j,
            len: best_size,
        }
    }

    /// Returns the non-overlapping matching blocks in ascending order,
    /// with adjacent blocks merged.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.len == 0 {
                continue;
            }
            let (i, j, k) = (block.a_start, block.b_start, block.len);
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
            blocks.push(block);
        }
        blocks.sort_unstable();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Similarity in `[0, 1]`; two empty sequences are identical.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|b| b.len).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Case-insensitive similarity of two names, in `[0, 1]`.
///
/// Not symmetric: `a` is the name searched for and `b` the candidate, and
/// the popular-element heuristic only looks at `b`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    SequenceMatcher::new(&a, &b).ratio()
}

// ─────────────────────────────────────────────────────────────────────────────
// Best Match Selection
// ─────────────────────────────────────────────────────────────────────────────

/// The winning item of a best-match search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<T> {
    /// Position of the winner in the input.
    pub index: usize,
    pub item: T,
    /// Similarity score in `[0, 1]`.
    pub score: f64,
}

/// Returns the candidate most similar to `target`.
///
/// Empty candidates are skipped. Scores are compared with a strict `>`, so
/// among equally good candidates the first one wins.
pub fn best_match<'a, S: AsRef<str>>(
    candidates: &'a [S],
    target: &str,
) -> Result<Match<&'a str>, MatchError> {
    let found = best_match_by(candidates, target, |c| c.as_ref())?;
    Ok(Match {
        index: found.index,
        item: found.item.as_ref(),
        score: found.score,
    })
}

/// Returns the item whose extracted name is most similar to `target`.
///
/// Same selection rules as [`best_match`]; `name_of` picks the name out of
/// each richer record.
pub fn best_match_by<'a, T, F>(
    items: &'a [T],
    target: &str,
    name_of: F,
) -> Result<Match<&'a T>, MatchError>
where
    F: Fn(&T) -> &str,
{
    if items.is_empty() {
        return Err(MatchError::EmptyInput);
    }

    let mut best: Option<Match<&'a T>> = None;
    for (index, item) in items.iter().enumerate() {
        let name = name_of(item);
        if name.is_empty() {
            continue;
        }
        let score = similarity(target, name);
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(Match { index, item, score });
        }
    }

    best.ok_or_else(|| MatchError::NoMatch {
        target: target.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        SequenceMatcher::new(&a, &b).ratio()
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(ratio("John Smith", "John Smith"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        assert_eq!(ratio("abcd", "bcde"), 0.75);
        // "qabxcd" vs "abycdf": blocks "ab" and "cd"
        assert!((ratio("qabxcd", "abycdf") - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_matching_blocks_are_merged_and_ordered() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![
                MatchingBlock { a_start: 0, b_start: 0, len: 2 },
                MatchingBlock { a_start: 3, b_start: 2, len: 2 },
            ]
        );
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a: Vec<char> = " abcd".chars().collect();
        let b: Vec<char> = "abcd abcd".chars().collect();
        let m = SequenceMatcher::new(&a, &b).find_longest_match(0, 5, 0, 9);
        assert_eq!(m, MatchingBlock { a_start: 0, b_start: 4, len: 5 });
    }

    #[test]
    fn test_popular_elements_in_long_sequences() {
        // 'a' is popular in b and cannot seed a match.
        let a: Vec<char> = "xa".repeat(10).chars().collect();
        let b: Vec<char> = "a".repeat(250).chars().collect();
        let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
        assert!(blocks.is_empty());

        // A leading run still grows out of the empty block at (0, 0).
        let a: Vec<char> = "a".repeat(10).chars().collect();
        let ratio = SequenceMatcher::new(&a, &b).ratio();
        assert!((ratio - 20.0 / 260.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_ignores_case() {
        assert_eq!(similarity("JOHN SMITH", "john smith"), 1.0);
        assert!(similarity("Jon Smith", "John Smith") < 1.0);
        assert!(similarity("Jon Smith", "John Smith") > similarity("Jane Doe", "John Smith"));
    }

    #[test]
    fn test_target_is_scored_as_first_sequence() {
        // "jane doe" vs "hannah jones" is 0.5 one way round and 0.3 the other
        assert!((similarity("Jane Doe", "Hannah Jones") - 0.3).abs() < 1e-12);
        assert!((similarity("Hannah Jones", "Jane Doe") - 0.5).abs() < 1e-12);
        assert!((similarity("Jane Doe", "Ann Marie") - 6.0 / 17.0).abs() < 1e-12);

        let names = ["Hannah Jones", "Ann Marie"];
        let found = best_match(&names, "Jane Doe").unwrap();
        assert_eq!(found.item, "Ann Marie");
        assert_eq!(found.index, 1);
        assert!((found.score - 6.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_exact_target() {
        let names = ["Jon Smith", "John Smith", "Jane Doe"];
        let found = best_match(&names, "John Smith").unwrap();
        assert_eq!(found.item, "John Smith");
        assert_eq!(found.index, 1);
        assert_eq!(found.score, 1.0);
    }

    #[test]
    fn test_best_match_case_insensitive_exact() {
        let names = vec!["Alice Jones".to_string(), "BOB BROWN".to_string()];
        let found = best_match(&names, "bob brown").unwrap();
        assert_eq!(found.item, "BOB BROWN");
        assert_eq!(found.score, 1.0);
    }

    #[test]
    fn test_ties_resolve_to_first() {
        let names = ["Alice Smith", "Alice Smith"];
        for _ in 0..10 {
            let found = best_match(&names, "Alice Smith").unwrap();
            assert_eq!(found.index, 0);
        }

        // Two different names with equal scores
        let names = ["ab", "ba"];
        let found = best_match(&names, "a").unwrap();
        assert_eq!(found.index, 0);
    }

    #[test]
    fn test_winner_scores_at_least_every_candidate() {
        let lists: [&[&str]; 4] = [
            &["Maria Garcia", "Mario Garcia", "Marie Curie", "Garcia Maria"],
            &["x", "xy", "xyz"],
            &["", "Ann", "Anna", "Hannah"],
            &["Zed"],
        ];
        let targets = ["maria", "xyz", "Anne", "Hannah Zed"];

        for list in lists {
            for target in targets {
                let found = best_match(list, target).unwrap();
                for name in list.iter().filter(|n| !n.is_empty()) {
                    assert!(found.score >= similarity(target, name));
                }
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let names: [&str; 0] = [];
        assert_eq!(best_match(&names, "anyone"), Err(MatchError::EmptyInput));
    }

    #[test]
    fn test_all_empty_candidates() {
        let names = ["", ""];
        let result = best_match(&names, "anyone");
        assert!(matches!(result, Err(MatchError::NoMatch { target }) if target == "anyone"));
    }

    #[test]
    fn test_empty_candidates_are_skipped() {
        let names = ["", "Zoe"];
        let found = best_match(&names, "completely different").unwrap();
        assert_eq!(found.index, 1);
    }

    #[test]
    fn test_best_match_by_extracts_names() {
        struct Person {
            id: u32,
            name: String,
        }

        let people = vec![
            Person { id: 1, name: "Li Wei".into() },
            Person { id: 2, name: String::new() },
            Person { id: 3, name: "Lee Way".into() },
        ];
        let found = best_match_by(&people, "lee way", |p| p.name.as_str()).unwrap();
        assert_eq!(found.item.id, 3);
        assert_eq!(found.score, 1.0);
    }
}
