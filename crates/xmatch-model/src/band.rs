//! Score bands shared by the statistics table and report colouring.

use serde::{Deserialize, Serialize};

/// One of six disjoint ranges partitioning the score scale.
///
/// | Band | Range |
/// |------|-------|
/// | `Perfect` | 100 |
/// | `High` | 90 to below 100 |
/// | `Medium` | 70 to below 90 |
/// | `Low` | 50 to below 70 |
/// | `VeryLow` | above 0, below 50 |
/// | `None` | 0 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Perfect,
    High,
    Medium,
    Low,
    VeryLow,
    None,
}

impl ScoreBand {
    /// All bands, best first.
    pub const ALL: [ScoreBand; 6] = [
        ScoreBand::Perfect,
        ScoreBand::High,
        ScoreBand::Medium,
        ScoreBand::Low,
        ScoreBand::VeryLow,
        ScoreBand::None,
    ];

    /// Band for a score. Every `f64` maps to exactly one band; NaN and
    /// negative values land in `None`.
    pub fn of(score: f64) -> Self {
        if score >= 100.0 {
            Self::Perfect
        } else if score >= 90.0 {
            Self::High
        } else if score >= 70.0 {
            Self::Medium
        } else if score >= 50.0 {
            Self::Low
        } else if score > 0.0 {
            Self::VeryLow
        } else {
            Self::None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "100%",
            Self::High => "90-99%",
            Self::Medium => "70-89%",
            Self::Low => "50-69%",
            Self::VeryLow => "1-49%",
            Self::None => "0%",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very low",
            Self::None => "No match",
        }
    }

    /// Background fill as `0xRRGGBB`.
    pub fn fill_rgb(self) -> u32 {
        match self {
            Self::Perfect => 0xD1FAE5,
            Self::High => 0xDBEAFE,
            Self::Medium => 0xFEF3C7,
            Self::Low => 0xFED7AA,
            Self::VeryLow => 0xFFE4E1,
            Self::None => 0xFEE2E2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(ScoreBand::of(100.0), ScoreBand::Perfect);
        assert_eq!(ScoreBand::of(99.9), ScoreBand::High);
        assert_eq!(ScoreBand::of(90.0), ScoreBand::High);
        assert_eq!(ScoreBand::of(89.99), ScoreBand::Medium);
        assert_eq!(ScoreBand::of(70.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::of(50.0), ScoreBand::Low);
        assert_eq!(ScoreBand::of(49.9), ScoreBand::VeryLow);
        assert_eq!(ScoreBand::of(0.1), ScoreBand::VeryLow);
        assert_eq!(ScoreBand::of(0.0), ScoreBand::None);
        assert_eq!(ScoreBand::of(f64::NAN), ScoreBand::None);
    }
}
