use serde::{Deserialize, Serialize};

use crate::band::ScoreBand;

/// Best match found for one source-1 record by one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    /// Combined, unnormalized value from source 1.
    pub source1_value: String,
    /// Combined, unnormalized value of the matched source-2 record, or empty.
    pub source2_value: String,
    /// Adjusted score in `[0, 100]`.
    pub score: f64,
    /// Display name of the method that produced the row.
    pub method: String,
    /// Other columns of the source-1 record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source1_fields: Vec<(String, String)>,
    /// Other columns of the matched source-2 record (blank values when unmatched).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source2_fields: Vec<(String, String)>,
}

impl MatchRow {
    pub fn is_matched(&self) -> bool {
        !self.source2_value.is_empty()
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.score)
    }
}

/// Per-band counts for a completed set of match rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub total: usize,
    pub perfect: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub very_low: usize,
    pub none: usize,
    pub mean_score: f64,
    /// Sum of the six band counts. Equals `total` for any correct aggregation.
    pub check_sum: usize,
}

impl MatchStatistics {
    pub fn count(&self, band: ScoreBand) -> usize {
        match band {
            ScoreBand::Perfect => self.perfect,
            ScoreBand::High => self.high,
            ScoreBand::Medium => self.medium,
            ScoreBand::Low => self.low,
            ScoreBand::VeryLow => self.very_low,
            ScoreBand::None => self.none,
        }
    }

    /// Share of rows in `band`, as a percentage of `total`.
    pub fn percentage(&self, band: ScoreBand) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(band) as f64 * 100.0 / self.total as f64
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.check_sum == self.total
    }

    /// Rows that found any candidate at or above the reject floor.
    pub fn matched(&self) -> usize {
        self.perfect + self.high + self.medium + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_row() {
        let row = MatchRow {
            source1_value: "r".into(),
            source2_value: String::new(),
            score: 0.0,
            method: "WRatio".into(),
            source1_fields: vec![],
            source2_fields: vec![],
        };
        assert!(!row.is_matched());
        assert_eq!(row.band(), ScoreBand::None);
    }

    #[test]
    fn test_percentage_of_empty_statistics() {
        let stats = MatchStatistics::default();
        assert_eq!(stats.percentage(ScoreBand::Perfect), 0.0);
        assert!(stats.is_consistent());
    }
}
