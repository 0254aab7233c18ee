//! Multi-method evaluation: auto selection and comparisons.

use tracing::info;

use crate::error::{MatchError, Result};
use crate::matcher::{Matcher, MethodRun, ProgressSink};
use crate::method::ScoringMethod;
use crate::ranking::{MethodComparison, compare_statistics, rank};

/// Winner of a sample comparison applied to the full input.
#[derive(Debug, Clone)]
pub struct AutoSelection {
    /// Sample ranking, best first.
    pub ranking: Vec<MethodComparison>,
    /// Full run of the winning method.
    pub run: MethodRun,
}

/// Evaluate `methods` on the first `sample_size` source-1 rows and rank them.
pub fn compare_on_sample(
    matcher: &Matcher<'_>,
    methods: &[ScoringMethod],
    progress: &mut dyn ProgressSink,
) -> Result<Vec<MethodComparison>> {
    if methods.is_empty() {
        return Err(MatchError::NoMethods);
    }
    let comparisons = methods
        .iter()
        .map(|method| matcher.run_sample(method, progress).comparison())
        .collect();
    let ranked = rank(comparisons);
    if let Some(best) = ranked.first() {
        info!(
            method = %best.method,
            perfect = best.statistics.perfect,
            high = best.statistics.high,
            mean = best.statistics.mean_score,
            sample = best.statistics.total,
            "best method on sample"
        );
    }
    Ok(ranked)
}

/// Pick the best method on a sample, then run it on every row.
pub fn auto_select(
    matcher: &Matcher<'_>,
    methods: &[ScoringMethod],
    progress: &mut dyn ProgressSink,
) -> Result<AutoSelection> {
    let ranking = compare_on_sample(matcher, methods, progress)?;
    let winner = ranking
        .first()
        .and_then(|best| methods.iter().find(|method| method.id() == best.method_id))
        .ok_or(MatchError::NoMethods)?;
    let run = matcher.run(winner, progress);
    Ok(AutoSelection { ranking, run })
}

/// Run every method on every row and return the runs best first.
pub fn compare_full(
    matcher: &Matcher<'_>,
    methods: &[ScoringMethod],
    progress: &mut dyn ProgressSink,
) -> Result<Vec<MethodRun>> {
    if methods.is_empty() {
        return Err(MatchError::NoMethods);
    }
    let mut runs: Vec<MethodRun> = methods
        .iter()
        .map(|method| matcher.run(method, progress))
        .collect();
    runs.sort_by(|a, b| compare_statistics(&a.statistics, &b.statistics));
    info!(methods = runs.len(), rows = matcher.queries().len(), "full comparison finished");
    Ok(runs)
}
