use std::path::PathBuf;

use xmatch_ingest::SourceCheck;
use xmatch_map::{MethodComparison, MethodRun};

/// Header preview and validation of one input file.
#[derive(Debug)]
pub struct ColumnsResult {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub check: SourceCheck,
}

/// Names of the two inputs and of the compared columns.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub left: String,
    pub right: String,
    pub left_columns: String,
    pub right_columns: String,
    pub left_rows: usize,
    pub right_rows: usize,
    /// Distinct non-empty candidates after normalization.
    pub candidates: usize,
    pub warnings: Vec<String>,
}

/// A report written to disk.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug)]
pub struct MatchResult {
    pub sources: SourceSummary,
    /// Sample ranking when the method was chosen automatically.
    pub ranking: Option<Vec<MethodComparison>>,
    pub run: MethodRun,
    pub report: Option<ReportFile>,
}

#[derive(Debug)]
pub struct CompareResult {
    pub sources: SourceSummary,
    pub sample_size: usize,
    pub ranking: Vec<MethodComparison>,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FullCompareResult {
    pub sources: SourceSummary,
    /// Runs ordered best first.
    pub runs: Vec<MethodRun>,
    pub output: PathBuf,
}
