//! Fuzzy best-match search between two tables.
//!
//! # Pipeline
//!
//! 1. Comparison keys are built for both sources ([`Matcher::new`])
//! 2. Source-2 keys form a deduplicated [`CandidatePool`]
//! 3. Each source-1 key is searched with a [`ScoringMethod`]: raw similarity,
//!    length penalty, reject floor
//! 4. Results are bucketed into score bands ([`aggregate`])
//! 5. Multiple methods are ordered with [`rank`]
//!
//! # Example
//!
//! ```ignore
//! use xmatch_map::{MatchRequest, Matcher, MethodRegistry, NoProgress};
//!
//! let matcher = Matcher::new(MatchRequest::new(&left, left_cols, &right, right_cols))?;
//! let registry = MethodRegistry::builtin();
//! let method = registry.get("wratio").expect("built-in method");
//! let run = matcher.run(method, &mut NoProgress);
//! println!("{} perfect matches", run.statistics.perfect);
//! ```

mod config;
mod error;
mod fuzz;
mod matcher;
mod method;
mod modes;
mod penalty;
mod pool;
mod ranking;
mod registry;
mod search;
mod similarity;
mod statistics;

// === Error Types ===
pub use error::{MatchError, Result, ScoringError};

// === Configuration ===
pub use config::MatchingConfig;

// === Scoring ===
pub use fuzz::{
    FastScorer, partial_ratio, partial_token_ratio, partial_token_set_ratio,
    partial_token_sort_ratio, qratio, ratio, token_ratio, token_set_ratio, token_sort_ratio, wratio,
};
pub use penalty::{adjusted_score, length_penalty};
pub use similarity::{
    CustomScorer, LinearScorer, ScoreFn, Similarity, bigram_jaccard, char_cosine, to_percentage,
};

// === Methods ===
pub use method::{Library, ScoringMethod, Strategy};
pub use registry::{BUILTIN_METHODS, MethodDescriptor, MethodKind, MethodRegistry};

// === Search ===
pub use pool::{Candidate, CandidatePool};
pub use search::{SearchOutcome, exact_match};

// === Matching Pass ===
pub use matcher::{
    Inheritance, MatchRequest, Matcher, MethodRun, NoProgress, PROGRESS_INTERVAL, ProgressSink,
    validate_selection,
};

// === Statistics and Ranking ===
pub use modes::{AutoSelection, auto_select, compare_full, compare_on_sample};
pub use ranking::{MethodComparison, compare_statistics, rank, rank_statistics};
pub use statistics::{aggregate, aggregate_scores};
