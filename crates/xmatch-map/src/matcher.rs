//! One matching pass: every source-1 record against the source-2 pool.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};
use xmatch_model::{ColumnSelection, MatchRow, MatchStatistics, Record, Table};
use xmatch_normalization::{ComparisonKey, NormalizationOptions, comparison_keys};

use crate::config::MatchingConfig;
use crate::error::{MatchError, Result};
use crate::method::ScoringMethod;
use crate::pool::CandidatePool;
use crate::ranking::MethodComparison;
use crate::search::SearchOutcome;
use crate::statistics::aggregate;

/// Rows between two progress notifications.
pub const PROGRESS_INTERVAL: usize = 10;

/// Receives progress of long-running passes.
pub trait ProgressSink {
    /// Called every [`PROGRESS_INTERVAL`] rows and after the last row.
    fn rows_processed(&mut self, _method: &str, _done: usize, _total: usize) {}

    /// Called once when a method finishes.
    fn method_finished(&mut self, _method: &str, _statistics: &MatchStatistics) {}
}

/// Progress sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Which non-key columns are copied onto result rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inheritance {
    pub source1: bool,
    pub source2: bool,
}

/// Inputs and settings of a matching run.
#[derive(Debug, Clone)]
pub struct MatchRequest<'a> {
    pub source1: &'a Table,
    pub source2: &'a Table,
    pub selection1: ColumnSelection,
    pub selection2: ColumnSelection,
    pub normalization: NormalizationOptions,
    pub config: MatchingConfig,
    pub inheritance: Inheritance,
}

impl<'a> MatchRequest<'a> {
    pub fn new(
        source1: &'a Table,
        selection1: ColumnSelection,
        source2: &'a Table,
        selection2: ColumnSelection,
    ) -> Self {
        Self {
            source1,
            source2,
            selection1,
            selection2,
            normalization: NormalizationOptions::default(),
            config: MatchingConfig::default(),
            inheritance: Inheritance::default(),
        }
    }

    #[must_use]
    pub fn with_normalization(mut self, options: NormalizationOptions) -> Self {
        self.normalization = options;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: MatchingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = inheritance;
        self
    }
}

/// Check both column selections against their tables.
///
/// Returns warnings for conditions that do not block matching.
pub fn validate_selection(
    source1: &Table,
    selection1: &ColumnSelection,
    source2: &Table,
    selection2: &ColumnSelection,
) -> Result<Vec<String>> {
    selection1
        .validate_against(source1)
        .map_err(|source| MatchError::Selection {
            side: "source 1",
            source,
        })?;
    selection2
        .validate_against(source2)
        .map_err(|source| MatchError::Selection {
            side: "source 2",
            source,
        })?;

    let mut warnings = Vec::new();
    if selection1.len() != selection2.len() {
        let message = format!(
            "source 1 combines {} column(s) but source 2 combines {}",
            selection1.len(),
            selection2.len()
        );
        warn!("{message}");
        warnings.push(message);
    }
    Ok(warnings)
}

/// Rows and statistics produced by one method.
#[derive(Debug, Clone)]
pub struct MethodRun {
    pub method_id: String,
    pub method: String,
    pub library: String,
    /// Result rows, highest score first.
    pub rows: Vec<MatchRow>,
    pub statistics: MatchStatistics,
    pub elapsed: Duration,
    pub failures: usize,
}

impl MethodRun {
    pub fn comparison(&self) -> MethodComparison {
        MethodComparison {
            method_id: self.method_id.clone(),
            method: self.method.clone(),
            library: self.library.clone(),
            statistics: self.statistics.clone(),
            failures: self.failures,
            elapsed: self.elapsed,
        }
    }
}

/// Prepared comparison keys for a request, reusable across methods.
#[derive(Debug)]
pub struct Matcher<'a> {
    request: MatchRequest<'a>,
    queries: Vec<ComparisonKey>,
    pool: CandidatePool,
    warnings: Vec<String>,
}

impl<'a> Matcher<'a> {
    /// Validate the request and normalize both sources.
    pub fn new(request: MatchRequest<'a>) -> Result<Self> {
        if request.source1.is_empty() {
            return Err(MatchError::EmptySource { side: "source 1" });
        }
        if request.source2.is_empty() {
            return Err(MatchError::EmptySource { side: "source 2" });
        }
        let warnings = validate_selection(
            request.source1,
            &request.selection1,
            request.source2,
            &request.selection2,
        )?;

        let queries = comparison_keys(
            request.source1,
            &request.selection1,
            &request.normalization,
        );
        let candidates = comparison_keys(
            request.source2,
            &request.selection2,
            &request.normalization,
        );
        let pool = CandidatePool::from_keys(&candidates);
        debug!(
            queries = queries.len(),
            empty_queries = queries.iter().filter(|key| key.is_empty()).count(),
            candidates = pool.len(),
            "sources prepared"
        );

        Ok(Self {
            request,
            queries,
            pool,
            warnings,
        })
    }

    pub fn request(&self) -> &MatchRequest<'a> {
        &self.request
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.request.config
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    pub fn queries(&self) -> &[ComparisonKey] {
        &self.queries
    }

    /// Match every source-1 record.
    pub fn run(&self, method: &ScoringMethod, progress: &mut dyn ProgressSink) -> MethodRun {
        self.run_rows(method, self.queries.len(), progress)
    }

    /// Match the first `sample_size` source-1 records.
    pub fn run_sample(&self, method: &ScoringMethod, progress: &mut dyn ProgressSink) -> MethodRun {
        let limit = self.request.config.sample_size.min(self.queries.len());
        self.run_rows(method, limit, progress)
    }

    fn run_rows(
        &self,
        method: &ScoringMethod,
        limit: usize,
        progress: &mut dyn ProgressSink,
    ) -> MethodRun {
        let span = info_span!("match_method", method = method.name(), rows = limit);
        let _guard = span.enter();
        let start = Instant::now();
        let config = &self.request.config;

        let mut rows = Vec::with_capacity(limit);
        let mut failures = 0;
        for (index, query) in self.queries.iter().take(limit).enumerate() {
            let outcome = method.find_best_match(&query.normalized, &self.pool, config);
            failures += outcome.failures;
            rows.push(self.build_row(index, query, &outcome, method));

            let done = index + 1;
            if done % PROGRESS_INTERVAL == 0 || done == limit {
                progress.rows_processed(method.name(), done, limit);
            }
        }
        rows.sort_by(|a, b| b.score.total_cmp(&a.score));

        let statistics = aggregate(&rows);
        let elapsed = start.elapsed();
        if failures > 0 {
            warn!(
                method = method.name(),
                failures, "some candidates could not be scored"
            );
        }
        debug!(
            method = method.name(),
            perfect = statistics.perfect,
            high = statistics.high,
            mean = statistics.mean_score,
            duration_ms = elapsed.as_millis(),
            "method finished"
        );
        progress.method_finished(method.name(), &statistics);

        MethodRun {
            method_id: method.id().to_string(),
            method: method.name().to_string(),
            library: method.library().name().to_string(),
            rows,
            statistics,
            elapsed,
            failures,
        }
    }

    fn build_row(
        &self,
        index: usize,
        query: &ComparisonKey,
        outcome: &SearchOutcome,
        method: &ScoringMethod,
    ) -> MatchRow {
        let request = &self.request;
        let (source2_value, score) = match &outcome.candidate {
            Some(candidate) => (
                candidate.original.clone(),
                request.config.round_score(outcome.score),
            ),
            None => (String::new(), 0.0),
        };

        let source1_fields = match request.source1.rows.get(index) {
            Some(record) if request.inheritance.source1 => {
                inherited_fields(record, &request.source1.columns, &request.selection1)
            }
            _ => Vec::new(),
        };
        let source2_fields = if request.inheritance.source2 {
            let matched = outcome
                .candidate
                .as_ref()
                .and_then(|candidate| request.source2.rows.get(candidate.row));
            match matched {
                Some(record) => {
                    inherited_fields(record, &request.source2.columns, &request.selection2)
                }
                None => blank_fields(&request.source2.columns, &request.selection2),
            }
        } else {
            Vec::new()
        };

        MatchRow {
            source1_value: query.original.clone(),
            source2_value,
            score,
            method: method.name().to_string(),
            source1_fields,
            source2_fields,
        }
    }
}

fn inherited_fields(
    record: &Record,
    columns: &[String],
    selection: &ColumnSelection,
) -> Vec<(String, String)> {
    columns
        .iter()
        .filter(|column| !selection.contains(column))
        .map(|column| (column.clone(), record.text(column)))
        .collect()
}

fn blank_fields(columns: &[String], selection: &ColumnSelection) -> Vec<(String, String)> {
    columns
        .iter()
        .filter(|column| !selection.contains(column))
        .map(|column| (column.clone(), String::new()))
        .collect()
}
