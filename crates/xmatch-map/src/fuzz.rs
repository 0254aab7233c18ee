//! Percentage scorers used by the fast search strategy.
//!
//! Every scorer is built on the RapidFuzz indel ratio and returns a value in
//! `[0, 100]`. Token variants split on whitespace, so inputs are expected to
//! be normalized already.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Scorers available to the fast search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastScorer {
    Ratio,
    QRatio,
    PartialRatio,
    TokenSortRatio,
    TokenSetRatio,
    TokenRatio,
    PartialTokenSortRatio,
    PartialTokenSetRatio,
    PartialTokenRatio,
    WRatio,
}

impl FastScorer {
    /// Similarity of `a` and `b` in `[0, 100]`.
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Self::Ratio => ratio(a, b),
            Self::QRatio => qratio(a, b),
            Self::PartialRatio => partial_ratio(a, b),
            Self::TokenSortRatio => token_sort_ratio(a, b),
            Self::TokenSetRatio => token_set_ratio(a, b),
            Self::TokenRatio => token_ratio(a, b),
            Self::PartialTokenSortRatio => partial_token_sort_ratio(a, b),
            Self::PartialTokenSetRatio => partial_token_set_ratio(a, b),
            Self::PartialTokenRatio => partial_token_ratio(a, b),
            Self::WRatio => wratio(a, b),
        }
    }
}

/// Normalized indel similarity as a percentage. Empty input scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    rapidfuzz::fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// [`ratio`] of the trimmed strings; whitespace-only input scores 0.
pub fn qratio(a: &str, b: &str) -> f64 {
    ratio(a.trim(), b.trim())
}

fn char_ratio(a: &[char], b: &[char]) -> f64 {
    rapidfuzz::fuzz::ratio(a.iter().copied(), b.iter().copied()) * 100.0
}

/// Best [`ratio`] of the shorter string against every same-length window of the longer.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return 0.0;
    }
    if shorter.len() == longer.len() {
        return char_ratio(&shorter, &longer);
    }

    let mut best = 0.0_f64;
    for window in longer.windows(shorter.len()) {
        best = best.max(char_ratio(&shorter, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// [`ratio`] after sorting the whitespace-separated tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// [`partial_ratio`] after sorting tokens.
pub fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

struct TokenSets {
    intersection: String,
    only_a: String,
    only_b: String,
}

impl TokenSets {
    fn new(a: &str, b: &str) -> Option<Self> {
        let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
        let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return None;
        }
        let join = |set: Vec<&str>| set.join(" ");
        Some(Self {
            intersection: join(tokens_a.intersection(&tokens_b).copied().collect()),
            only_a: join(tokens_a.difference(&tokens_b).copied().collect()),
            only_b: join(tokens_b.difference(&tokens_a).copied().collect()),
        })
    }

    /// One token set contains the other.
    fn is_subset(&self) -> bool {
        !self.intersection.is_empty() && (self.only_a.is_empty() || self.only_b.is_empty())
    }
}

fn joined(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// Compares the shared tokens against each side's full token set.
///
/// Scores 100 when one token set contains the other.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let Some(sets) = TokenSets::new(a, b) else {
        return 0.0;
    };
    if sets.is_subset() {
        return 100.0;
    }
    let with_a = joined(&sets.intersection, &sets.only_a);
    let with_b = joined(&sets.intersection, &sets.only_b);
    ratio(&sets.intersection, &with_a)
        .max(ratio(&sets.intersection, &with_b))
        .max(ratio(&with_a, &with_b))
}

/// Any shared token scores 100; otherwise [`partial_ratio`] of the differences.
pub fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    let Some(sets) = TokenSets::new(a, b) else {
        return 0.0;
    };
    if !sets.intersection.is_empty() {
        return 100.0;
    }
    partial_ratio(&sets.only_a, &sets.only_b)
}

/// Maximum of [`token_sort_ratio`] and [`token_set_ratio`].
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// Maximum of [`partial_token_sort_ratio`] and [`partial_token_set_ratio`].
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    partial_token_sort_ratio(a, b).max(partial_token_set_ratio(a, b))
}

const UNBASE_SCALE: f64 = 0.95;

/// Weighted combination that picks partial or full comparisons based on the length ratio.
pub fn wratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let base = ratio(a, b);

    if len_ratio < 1.5 {
        return base
            .max(token_sort_ratio(a, b) * UNBASE_SCALE)
            .max(token_set_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    base.max(partial_ratio(a, b) * partial_scale)
        .max(partial_token_sort_ratio(a, b) * UNBASE_SCALE * partial_scale)
        .max(partial_token_set_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FastScorer; 10] = [
        FastScorer::Ratio,
        FastScorer::QRatio,
        FastScorer::PartialRatio,
        FastScorer::TokenSortRatio,
        FastScorer::TokenSetRatio,
        FastScorer::TokenRatio,
        FastScorer::PartialTokenSortRatio,
        FastScorer::PartialTokenSetRatio,
        FastScorer::PartialTokenRatio,
        FastScorer::WRatio,
    ];

    #[test]
    fn test_identical_strings_score_100() {
        for scorer in ALL {
            let score = scorer.score("adobe reader", "adobe reader");
            assert!((score - 100.0).abs() < 1e-9, "{scorer:?} gave {score}");
        }
    }

    #[test]
    fn test_empty_scores_zero() {
        for scorer in ALL {
            assert_eq!(scorer.score("", "adobe"), 0.0, "{scorer:?}");
            assert_eq!(scorer.score("adobe", ""), 0.0, "{scorer:?}");
        }
    }

    #[test]
    fn test_scores_stay_in_range() {
        for scorer in ALL {
            let score = scorer.score("microsoft office", "office suite pro");
            assert!((0.0..=100.0).contains(&score), "{scorer:?} gave {score}");
        }
    }

    #[test]
    fn test_qratio_ignores_surrounding_whitespace() {
        assert_eq!(qratio("  nginx ", "nginx"), 100.0);
        assert_eq!(qratio("   ", "nginx"), 0.0);
        assert_eq!(qratio("adobe reader", "adobe acrobat"), ratio("adobe reader", "adobe acrobat"));
    }

    #[test]
    fn test_token_order_is_ignored() {
        assert!((token_sort_ratio("office microsoft", "microsoft office") - 100.0).abs() < 1e-9);
        assert!(ratio("office microsoft", "microsoft office") < 100.0);
    }

    #[test]
    fn test_token_subset_scores_100() {
        assert_eq!(token_set_ratio("office", "microsoft office"), 100.0);
        assert_eq!(partial_token_set_ratio("office 365", "office pro"), 100.0);
    }

    #[test]
    fn test_partial_ratio_finds_substring() {
        assert!((partial_ratio("nginx", "nginx web server") - 100.0).abs() < 1e-9);
        assert!((partial_ratio("r", "proficy ifix") - 100.0).abs() < 1e-9);
    }
}
