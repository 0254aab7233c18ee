//! CLI argument definitions for the cross-source matcher.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use xmatch_report::ExportFilter;

#[derive(Parser)]
#[command(
    name = "xmatch",
    version,
    about = "Fuzzy matching of names between two tables",
    long_about = "Find, for every record of a first table, the most similar record of a second table.\n\n\
                  Reads CSV and spreadsheet files, compares selected columns after normalization\n\
                  and reports scores, statistics and method rankings as XLSX or CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values from the inputs to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the columns of an input file and check that it can be matched.
    Columns(ColumnsArgs),

    /// List the available matching methods.
    Methods,

    /// Match two tables with one method, or pick the best method automatically.
    Match(MatchArgs),

    /// Rank methods on a sample of the first table.
    Compare(CompareArgs),

    /// Run every method on all rows and write one sheet per method.
    FullCompare(FullCompareArgs),
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Input file (CSV, TXT, XLSX, XLS, XLSB or ODS).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Worksheet to read (default: the first one).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Field delimiter for text files (default: detected).
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Settings file with ingest options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Inputs, column selection and options shared by every matching command.
#[derive(Args)]
pub struct SourceArgs {
    /// First table: every row of it gets a best match.
    #[arg(long = "left", value_name = "FILE")]
    pub left: PathBuf,

    /// Second table: the candidates.
    #[arg(long = "right", value_name = "FILE")]
    pub right: PathBuf,

    /// Columns of the first table to compare, comma separated, at most two
    /// (default: the first column).
    #[arg(long = "left-cols", value_name = "COLS", value_delimiter = ',')]
    pub left_cols: Vec<String>,

    /// Columns of the second table to compare, comma separated, at most two
    /// (default: the first column).
    #[arg(long = "right-cols", value_name = "COLS", value_delimiter = ',')]
    pub right_cols: Vec<String>,

    /// Worksheet of the first table.
    #[arg(long = "left-sheet", value_name = "NAME")]
    pub left_sheet: Option<String>,

    /// Worksheet of the second table.
    #[arg(long = "right-sheet", value_name = "NAME")]
    pub right_sheet: Option<String>,

    /// Field delimiter for text files (default: detected).
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Copy the other columns of the first table onto result rows.
    #[arg(long = "inherit-left")]
    pub inherit_left: bool,

    /// Copy the other columns of the matched second-table row onto result rows.
    #[arg(long = "inherit-right")]
    pub inherit_right: bool,

    /// Scores below this are reported as no match (default: 50).
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Rows of the first table used when comparing methods (default: 200).
    #[arg(long = "sample-size", value_name = "N")]
    pub sample_size: Option<usize>,

    /// Settings file; flags given on the command line win.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub normalization: NormalizationArgs,
}

/// Normalization switches. Each flag only turns its step on (or, for
/// punctuation, off); anything not given keeps the settings file value.
#[derive(Args)]
pub struct NormalizationArgs {
    /// Remove legal forms such as LLC, GmbH or OOO.
    #[arg(long = "remove-legal")]
    pub remove_legal: bool,

    /// Remove years, versions, service packs and platform tokens.
    #[arg(long = "remove-versions")]
    pub remove_versions: bool,

    /// Remove short function words.
    #[arg(long = "remove-stopwords")]
    pub remove_stopwords: bool,

    /// Transliterate Cyrillic to Latin.
    #[arg(long = "transliterate")]
    pub transliterate: bool,

    /// Keep punctuation instead of replacing it with spaces.
    #[arg(long = "keep-punctuation")]
    pub keep_punctuation: bool,
}

/// Where and what to export.
#[derive(Args)]
pub struct ExportArgs {
    /// Rows written to the report.
    #[arg(long = "export", value_enum)]
    pub export: Option<ExportArg>,

    /// Leave out the statistics sheet.
    #[arg(long = "no-statistics")]
    pub no_statistics: bool,
}

#[derive(Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Method id or name (see `xmatch methods`).
    #[arg(
        long = "method",
        value_name = "METHOD",
        default_value = "wratio",
        conflicts_with = "auto"
    )]
    pub method: String,

    /// Rank methods on a sample and apply the best one.
    #[arg(long = "auto")]
    pub auto: bool,

    /// Methods considered by --auto, comma separated (default: all).
    #[arg(long = "methods", value_name = "IDS", value_delimiter = ',', requires = "auto")]
    pub methods: Vec<String>,

    /// Report file (.xlsx for a workbook, anything else for CSV).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub export: ExportArgs,

    /// Result rows printed to the terminal.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Methods to compare, comma separated (default: all).
    #[arg(long = "methods", value_name = "IDS", value_delimiter = ',')]
    pub methods: Vec<String>,

    /// Ranking file (.xlsx for a workbook, anything else for CSV).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FullCompareArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Methods to compare, comma separated (default: all).
    #[arg(long = "methods", value_name = "IDS", value_delimiter = ',')]
    pub methods: Vec<String>,

    /// Workbook with a summary sheet and one sheet per method.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Rows written to each method sheet.
    #[arg(long = "export", value_enum)]
    pub export: Option<ExportArg>,
}

/// CLI export filter choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ExportArg {
    All,
    Perfect,
    NeedsReview,
    NoMatch,
}

impl From<ExportArg> for ExportFilter {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::All => ExportFilter::All,
            ExportArg::Perfect => ExportFilter::Perfect,
            ExportArg::NeedsReview => ExportFilter::NeedsReview,
            ExportArg::NoMatch => ExportFilter::NoMatch,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Accepts a single character, or `tab` / `\t` for a tab.
fn parse_delimiter(value: &str) -> Result<char, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("tab"), Ok('\t'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_match_arguments() {
        let cli = Cli::try_parse_from([
            "xmatch",
            "match",
            "--left",
            "a.csv",
            "--right",
            "b.xlsx",
            "--left-cols",
            "Name,Version",
            "--remove-legal",
            "--export",
            "needs-review",
        ])
        .unwrap();
        let Command::Match(args) = cli.command else {
            panic!("expected match command");
        };
        assert_eq!(args.sources.left_cols, ["Name", "Version"]);
        assert!(args.sources.right_cols.is_empty());
        assert!(args.sources.normalization.remove_legal);
        assert_eq!(args.method, "wratio");
        assert!(matches!(args.export.export, Some(ExportArg::NeedsReview)));
    }

    #[test]
    fn test_methods_require_auto() {
        let result = Cli::try_parse_from([
            "xmatch", "match", "--left", "a.csv", "--right", "b.csv", "--methods", "ratio",
        ]);
        assert!(result.is_err());
    }
}
