//! Ordering of methods by their match statistics.
//!
//! Methods are compared lexicographically on perfect count, then high
//! count, then mean score, all descending. Sample-based auto selection and
//! full comparisons both go through [`compare_statistics`], so they always
//! agree on the winner.

use std::cmp::Ordering;
use std::time::Duration;

use serde::Serialize;
use xmatch_model::MatchStatistics;

/// Statistics of one method evaluated on a common input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodComparison {
    pub method_id: String,
    pub method: String,
    pub library: String,
    pub statistics: MatchStatistics,
    /// Candidates skipped because their similarity failed.
    pub failures: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Best-first ordering of two statistics.
pub fn compare_statistics(a: &MatchStatistics, b: &MatchStatistics) -> Ordering {
    b.perfect
        .cmp(&a.perfect)
        .then_with(|| b.high.cmp(&a.high))
        .then_with(|| b.mean_score.total_cmp(&a.mean_score))
}

/// Sort comparisons best first. Ties keep their input order.
pub fn rank(mut comparisons: Vec<MethodComparison>) -> Vec<MethodComparison> {
    comparisons.sort_by(|a, b| compare_statistics(&a.statistics, &b.statistics));
    comparisons
}

/// [`rank`] for bare `(method name, statistics)` pairs.
pub fn rank_statistics(mut entries: Vec<(String, MatchStatistics)>) -> Vec<(String, MatchStatistics)> {
    entries.sort_by(|a, b| compare_statistics(&a.1, &b.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(perfect: usize, high: usize, mean_score: f64) -> MatchStatistics {
        MatchStatistics {
            perfect,
            high,
            mean_score,
            ..MatchStatistics::default()
        }
    }

    #[test]
    fn test_perfect_count_beats_average() {
        let ranked = rank_statistics(vec![
            ("B".to_string(), stats(48, 40, 90.0)),
            ("A".to_string(), stats(50, 30, 85.0)),
        ]);
        assert_eq!(ranked[0].0, "A");
    }

    #[test]
    fn test_high_count_breaks_perfect_ties() {
        let ranked = rank_statistics(vec![
            ("A".to_string(), stats(10, 5, 99.0)),
            ("B".to_string(), stats(10, 6, 50.0)),
        ]);
        assert_eq!(ranked[0].0, "B");
    }

    #[test]
    fn test_mean_breaks_remaining_ties() {
        let ranked = rank_statistics(vec![
            ("A".to_string(), stats(10, 5, 70.0)),
            ("B".to_string(), stats(10, 5, 71.0)),
        ]);
        assert_eq!(ranked[0].0, "B");
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let ranked = rank_statistics(vec![
            ("first".to_string(), stats(1, 1, 60.0)),
            ("second".to_string(), stats(1, 1, 60.0)),
        ]);
        let names: Vec<&str> = ranked.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
