//! Export filters and report options.

use serde::{Deserialize, Serialize};
use xmatch_model::{MatchRow, ScoreBand};

/// Subset of result rows written to a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFilter {
    /// Every row.
    #[default]
    All,
    /// Rows scoring exactly 100.
    Perfect,
    /// Rows scoring below 90, including unmatched ones.
    NeedsReview,
    /// Rows without a match.
    NoMatch,
}

impl ExportFilter {
    pub const ALL: [ExportFilter; 4] = [Self::All, Self::Perfect, Self::NeedsReview, Self::NoMatch];

    pub fn matches(self, row: &MatchRow) -> bool {
        match self {
            Self::All => true,
            Self::Perfect => row.band() == ScoreBand::Perfect,
            Self::NeedsReview => row.score < 90.0,
            Self::NoMatch => row.band() == ScoreBand::None,
        }
    }

    /// Rows of `rows` kept by this filter, in their original order.
    pub fn apply<'a>(self, rows: &'a [MatchRow]) -> Vec<&'a MatchRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all results",
            Self::Perfect => "perfect matches",
            Self::NeedsReview => "rows needing review",
            Self::NoMatch => "unmatched rows",
        }
    }
}

/// What goes into a results report besides the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub filter: ExportFilter,
    /// Add a `Statistics` sheet (XLSX only).
    pub include_statistics: bool,
    /// Header text after `Source 1: ` for the compared value.
    pub source1_label: String,
    /// Header text after `Source 2: ` for the compared value.
    pub source2_label: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            filter: ExportFilter::All,
            include_statistics: true,
            source1_label: "value".to_string(),
            source2_label: "value".to_string(),
        }
    }
}

impl ReportOptions {
    pub fn new(source1_label: impl Into<String>, source2_label: impl Into<String>) -> Self {
        Self {
            source1_label: source1_label.into(),
            source2_label: source2_label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ExportFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_statistics(mut self, include: bool) -> Self {
        self.include_statistics = include;
        self
    }
}
