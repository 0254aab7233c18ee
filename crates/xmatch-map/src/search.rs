//! Best-match search over a candidate pool.

use tracing::trace;

use crate::config::MatchingConfig;
use crate::fuzz::FastScorer;
use crate::penalty::adjusted_score;
use crate::pool::{Candidate, CandidatePool};
use crate::similarity::LinearScorer;

/// Result of searching one query against a pool.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Accepted candidate, or `None` when nothing reached the reject floor.
    pub candidate: Option<Candidate>,
    /// Adjusted score of the accepted candidate; 0 without one.
    pub score: f64,
    /// Candidates skipped because their similarity could not be computed.
    pub failures: usize,
}

impl SearchOutcome {
    pub fn no_match(failures: usize) -> Self {
        Self {
            candidate: None,
            score: 0.0,
            failures,
        }
    }

    /// Original value of the accepted candidate, or an empty string.
    pub fn value(&self) -> &str {
        self.candidate
            .as_ref()
            .map_or("", |candidate| candidate.original.as_str())
    }

    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }
}

fn accept(
    pool: &CandidatePool,
    best: Option<(usize, f64)>,
    failures: usize,
    config: &MatchingConfig,
) -> SearchOutcome {
    match best.and_then(|(index, score)| pool.get(index).map(|c| (c, score))) {
        Some((candidate, score)) if score.is_finite() && score >= config.reject_threshold => {
            SearchOutcome {
                candidate: Some(candidate.clone()),
                score: score.min(100.0),
                failures,
            }
        }
        _ => SearchOutcome::no_match(failures),
    }
}

/// Pick the candidate with the best raw score at or above the cutoff, then
/// apply the length penalty to that single candidate.
pub(crate) fn fast_search(
    scorer: FastScorer,
    query: &str,
    pool: &CandidatePool,
    config: &MatchingConfig,
) -> SearchOutcome {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in pool.iter().enumerate() {
        let raw = scorer.score(query, &candidate.normalized);
        if raw < config.fast_cutoff {
            continue;
        }
        if best.is_none_or(|(_, top)| raw > top) {
            best = Some((index, raw));
            if raw >= 100.0 {
                break;
            }
        }
    }
    let best = best.and_then(|(index, raw)| {
        pool.get(index)
            .map(|candidate| (index, adjusted_score(raw, query, &candidate.normalized, config)))
    });
    accept(pool, best, 0, config)
}

/// Score every candidate, keeping the best adjusted score.
///
/// A candidate whose similarity fails contributes nothing and the scan
/// continues. Stops early once a score reaches `early_exit_score`.
pub(crate) fn linear_scan(
    scorer: &LinearScorer,
    query: &str,
    pool: &CandidatePool,
    config: &MatchingConfig,
) -> SearchOutcome {
    let mut best: Option<(usize, f64)> = None;
    let mut failures = 0;
    for (index, candidate) in pool.iter().enumerate() {
        let adjusted = match scorer.percentage(query, &candidate.normalized) {
            Ok(percentage) => adjusted_score(percentage, query, &candidate.normalized, config),
            Err(error) => {
                failures += 1;
                trace!(%error, candidate = index, "candidate skipped");
                continue;
            }
        };
        if best.is_none_or(|(_, top)| adjusted > top) {
            best = Some((index, adjusted));
        }
        if adjusted >= config.early_exit_score {
            break;
        }
    }
    accept(pool, best, failures, config)
}

/// Case and whitespace insensitive form used by exact matching.
fn fold(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 100 when both strings are identical after lower-casing and collapsing
/// whitespace, otherwise 0.
pub fn exact_match(a: &str, b: &str) -> f64 {
    if fold(a) == fold(b) { 100.0 } else { 0.0 }
}

pub(crate) fn exact_search(
    query: &str,
    pool: &CandidatePool,
    config: &MatchingConfig,
) -> SearchOutcome {
    let folded = fold(query);
    let best = pool
        .iter()
        .position(|candidate| fold(&candidate.normalized) == folded)
        .map(|index| (index, 100.0));
    accept(pool, best, 0, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use crate::similarity::{CustomScorer, Similarity};

    #[test]
    fn test_exact_match_folds_case_and_space() {
        assert_eq!(exact_match("Adobe  Reader", "adobe reader"), 100.0);
        assert_eq!(exact_match("adobe reader", "adobe readers"), 0.0);
    }

    #[test]
    fn test_linear_scan_skips_failing_candidates() {
        let scorer = LinearScorer::Custom(CustomScorer::new(|_, candidate| {
            if candidate == "bad" {
                Err(ScoringError::Custom("bad pair".into()))
            } else {
                Ok(fixed_similarity(candidate))
            }
        }));
        let pool = CandidatePool::from_normalized(["bad", "nginx"]);
        let outcome = linear_scan(&scorer, "nginx", &pool, &MatchingConfig::default());
        assert_eq!(outcome.value(), "nginx");
        assert_eq!(outcome.failures, 1);
        assert_eq!(outcome.score, 100.0);
    }

    fn fixed_similarity(candidate: &str) -> f64 {
        if candidate == "nginx" { 1.0 } else { 0.0 }
    }

    #[test]
    fn test_linear_scan_stops_at_perfect_score() {
        let pool = CandidatePool::from_normalized(["nginx", "nginx plus"]);
        let scorer = LinearScorer::Builtin(Similarity::JaroWinkler);
        let outcome = linear_scan(&scorer, "nginx", &pool, &MatchingConfig::default());
        assert_eq!(outcome.candidate.map(|c| c.row), Some(0));
    }

    #[test]
    fn test_fast_search_rejects_after_penalty() {
        let pool = CandidatePool::from_normalized(["proficy ifix"]);
        let outcome = fast_search(
            FastScorer::PartialRatio,
            "r",
            &pool,
            &MatchingConfig::default(),
        );
        assert_eq!(outcome, SearchOutcome::no_match(0));
    }
}
