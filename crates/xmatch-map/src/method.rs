//! Scoring methods: a named similarity plus the search strategy that drives it.

use serde::{Deserialize, Serialize};

use crate::config::MatchingConfig;
use crate::error::ScoringError;
use crate::fuzz::FastScorer;
use crate::penalty::adjusted_score;
use crate::pool::CandidatePool;
use crate::search::{SearchOutcome, exact_match, exact_search, fast_search, linear_scan};
use crate::similarity::{CustomScorer, LinearScorer};

/// Library that provides a method's similarity function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Library {
    RapidFuzz,
    Strsim,
    Builtin,
    Custom,
}

impl Library {
    pub fn name(self) -> &'static str {
        match self {
            Self::RapidFuzz => "RapidFuzz",
            Self::Strsim => "strsim",
            Self::Builtin => "built-in",
            Self::Custom => "custom",
        }
    }

    /// Whether the library was compiled into this build.
    pub fn is_available(self) -> bool {
        match self {
            Self::Strsim => cfg!(feature = "strsim"),
            Self::RapidFuzz | Self::Builtin | Self::Custom => true,
        }
    }
}

/// How a method searches the candidate pool.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Best raw score over the pool with a cutoff, penalty applied to the winner.
    FastSearch(FastScorer),
    /// Every candidate scored and penalized; best adjusted score wins.
    LinearScan(LinearScorer),
    /// Case and whitespace insensitive identity; no length penalty.
    Exact,
}

/// A registered matching algorithm.
#[derive(Debug, Clone)]
pub struct ScoringMethod {
    id: String,
    name: String,
    library: Library,
    strategy: Strategy,
}

impl ScoringMethod {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        library: Library,
        strategy: Strategy,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            library,
            strategy,
        }
    }

    /// Linear-scan method backed by a user function.
    ///
    /// The function may return a fraction in `[0, 1]` or a percentage.
    pub fn custom<F>(id: impl Into<String>, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<f64, ScoringError> + Send + Sync + 'static,
    {
        Self::new(
            id,
            name,
            Library::Custom,
            Strategy::LinearScan(LinearScorer::Custom(CustomScorer::new(f))),
        )
    }

    pub fn exact() -> Self {
        Self::new("exact", "Exact Match", Library::Builtin, Strategy::Exact)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn library(&self) -> Library {
        self.library
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn uses_fast_search(&self) -> bool {
        matches!(self.strategy, Strategy::FastSearch(_))
    }

    /// Adjusted score of a single pair, before the reject floor.
    pub fn score_pair(
        &self,
        query: &str,
        candidate: &str,
        config: &MatchingConfig,
    ) -> Result<f64, ScoringError> {
        match &self.strategy {
            Strategy::FastSearch(scorer) => {
                let raw = scorer.score(query, candidate);
                if raw < config.fast_cutoff {
                    Ok(0.0)
                } else {
                    Ok(adjusted_score(raw, query, candidate, config))
                }
            }
            Strategy::LinearScan(scorer) => scorer
                .percentage(query, candidate)
                .map(|percentage| adjusted_score(percentage, query, candidate, config)),
            Strategy::Exact => Ok(exact_match(query, candidate)),
        }
    }

    /// Best candidate for `query`, or no match.
    ///
    /// Empty queries and empty pools return no match without searching.
    /// Any accepted candidate scores at least `config.reject_threshold`.
    pub fn find_best_match(
        &self,
        query: &str,
        pool: &CandidatePool,
        config: &MatchingConfig,
    ) -> SearchOutcome {
        if query.is_empty() || pool.is_empty() {
            return SearchOutcome::no_match(0);
        }
        match &self.strategy {
            Strategy::FastSearch(scorer) => fast_search(*scorer, query, pool, config),
            Strategy::LinearScan(scorer) => linear_scan(scorer, query, pool, config),
            Strategy::Exact => exact_search(query, pool, config),
        }
    }
}
