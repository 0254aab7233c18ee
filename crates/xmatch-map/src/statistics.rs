//! Band counts and mean score over a completed match table.

use tracing::error;
use xmatch_model::{MatchRow, MatchStatistics, ScoreBand};

/// Aggregate the scores of `rows` into [`MatchStatistics`].
pub fn aggregate(rows: &[MatchRow]) -> MatchStatistics {
    aggregate_scores(rows.iter().map(|row| row.score))
}

/// Count each score into exactly one band and compute the mean.
///
/// Logs an error (and fails debug builds) if the band counts do not add
/// up to the number of scores.
pub fn aggregate_scores<I>(scores: I) -> MatchStatistics
where
    I: IntoIterator<Item = f64>,
{
    let mut stats = MatchStatistics::default();
    let mut sum = 0.0;
    for score in scores {
        stats.total += 1;
        sum += score;
        match ScoreBand::of(score) {
            ScoreBand::Perfect => stats.perfect += 1,
            ScoreBand::High => stats.high += 1,
            ScoreBand::Medium => stats.medium += 1,
            ScoreBand::Low => stats.low += 1,
            ScoreBand::VeryLow => stats.very_low += 1,
            ScoreBand::None => stats.none += 1,
        }
    }
    stats.mean_score = if stats.total == 0 {
        0.0
    } else {
        sum / stats.total as f64
    };
    stats.check_sum = ScoreBand::ALL.iter().map(|&band| stats.count(band)).sum();

    if !stats.is_consistent() {
        error!(
            total = stats.total,
            check_sum = stats.check_sum,
            "score band counts do not add up to the row count"
        );
        debug_assert!(stats.is_consistent(), "band check-sum mismatch");
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_fall_into_disjoint_bands() {
        let stats = aggregate_scores([100.0, 100.0, 95.0, 80.0, 60.0, 30.0, 0.0]);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.perfect, 2);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.very_low, 1);
        assert_eq!(stats.none, 1);
        assert_eq!(stats.check_sum, 7);
        assert!((stats.mean_score - 465.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_has_zero_mean() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.mean_score, 0.0);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_band_boundaries_are_not_cumulative() {
        let stats = aggregate_scores([90.0, 70.0, 50.0]);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.perfect + stats.very_low + stats.none, 0);
    }
}
