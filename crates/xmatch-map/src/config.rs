use serde::{Deserialize, Serialize};

/// Tunable constants of the scoring pipeline.
///
/// Defaults reproduce the established behaviour; changing them changes
/// which candidates are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Adjusted scores below this are reported as "no match" (default: 50).
    pub reject_threshold: f64,
    /// Strings at or below this many characters get the harsh penalty (default: 3).
    pub short_string_len: usize,
    /// Penalty exponent when either string is short (default: 2).
    pub short_exponent: f64,
    /// Penalty exponent otherwise (default: 0.5).
    pub long_exponent: f64,
    /// Raw score a fast-search candidate needs before the penalty (default: 50).
    pub fast_cutoff: f64,
    /// Linear scans stop once an adjusted score reaches this (default: 99.9).
    pub early_exit_score: f64,
    /// Source-1 rows evaluated when comparing methods on a sample (default: 200).
    pub sample_size: usize,
    /// Decimal places kept on reported scores (default: 1).
    pub score_precision: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            reject_threshold: 50.0,
            short_string_len: 3,
            short_exponent: 2.0,
            long_exponent: 0.5,
            fast_cutoff: 50.0,
            early_exit_score: 99.9,
            sample_size: 200,
            score_precision: 1,
        }
    }
}

impl MatchingConfig {
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_reject_threshold(mut self, threshold: f64) -> Self {
        self.reject_threshold = threshold;
        self
    }

    /// Round a score to `score_precision` decimal places.
    pub fn round_score(&self, score: f64) -> f64 {
        let factor = 10f64.powi(self.score_precision.min(6) as i32);
        (score * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score() {
        let config = MatchingConfig::default();
        assert_eq!(config.round_score(87.6543), 87.7);
        assert_eq!(config.round_score(99.96), 100.0);
    }
}
