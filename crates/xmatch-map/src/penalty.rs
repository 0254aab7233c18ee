//! Length-mismatch penalty applied to raw similarity scores.

use crate::config::MatchingConfig;

/// Multiplier in `[0, 1]` for two strings of the given character lengths.
///
/// With `r = min / max`, returns `r^short_exponent` when either length is at
/// most `short_string_len`, otherwise `r^long_exponent`. Two empty strings
/// give 0.
pub fn length_penalty(query_len: usize, candidate_len: usize, config: &MatchingConfig) -> f64 {
    let longest = query_len.max(candidate_len);
    if longest == 0 {
        return 0.0;
    }
    let shortest = query_len.min(candidate_len);
    let ratio = shortest as f64 / longest as f64;
    let exponent = if shortest <= config.short_string_len {
        config.short_exponent
    } else {
        config.long_exponent
    };
    ratio.powf(exponent)
}

/// Raw score in `[0, 100]` scaled by [`length_penalty`].
pub fn adjusted_score(raw: f64, query: &str, candidate: &str, config: &MatchingConfig) -> f64 {
    raw * length_penalty(query.chars().count(), candidate.chars().count(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_lengths_have_no_penalty() {
        let config = MatchingConfig::default();
        assert_eq!(length_penalty(1, 1, &config), 1.0);
        assert_eq!(length_penalty(12, 12, &config), 1.0);
    }

    #[test]
    fn test_short_strings_are_quadratic() {
        let config = MatchingConfig::default();
        let penalty = length_penalty(1, 5, &config);
        assert!((penalty - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_long_strings_use_square_root() {
        let config = MatchingConfig::default();
        let penalty = length_penalty(4, 16, &config);
        assert!((penalty - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_strings() {
        let config = MatchingConfig::default();
        assert_eq!(length_penalty(0, 0, &config), 0.0);
        assert_eq!(length_penalty(0, 4, &config), 0.0);
    }

    #[test]
    fn test_adjusted_score_counts_characters() {
        let config = MatchingConfig::default();
        assert_eq!(adjusted_score(80.0, "щит", "щит", &config), 80.0);
    }
}
