use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::Table as TextTable;
use tracing::{info, info_span, trace, warn};

use xmatch_cli::logging::redact_value;
use xmatch_cli::settings::{Settings, load_settings};
use xmatch_ingest::{IngestOptions, load_table, read_headers, validate_source};
use xmatch_map::{
    Inheritance, MatchError, MatchRequest, Matcher, MatchingConfig, MethodRegistry,
    auto_select, compare_full, compare_on_sample,
};
use xmatch_model::{ColumnSelection, MatchRow, Table};
use xmatch_normalization::NormalizationOptions;
use xmatch_report::{
    ExportFilter, ReportOptions, write_comparison, write_full_comparison, write_results,
};

use crate::cli::{
    ColumnsArgs, CompareArgs, ExportArg, FullCompareArgs, MatchArgs, NormalizationArgs, SourceArgs,
};
use crate::progress::TerminalProgress;
use crate::summary::apply_table_style;
use crate::types::{
    ColumnsResult, CompareResult, FullCompareResult, MatchResult, ReportFile, SourceSummary,
};

pub fn run_methods() -> Result<()> {
    let registry = MethodRegistry::builtin();
    let mut table = TextTable::new();
    table.set_header(vec!["ID", "Method", "Library", "Search"]);
    apply_table_style(&mut table);
    for method in registry.methods() {
        let search = if method.uses_fast_search() {
            "fast"
        } else {
            "linear"
        };
        table.add_row(vec![
            method.id(),
            method.name(),
            method.library().name(),
            search,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<ColumnsResult> {
    let settings = load_settings(args.config.as_deref())?;
    let options = ingest_options(&settings, args.delimiter, args.sheet.as_deref());
    let columns = read_headers(&args.file, &options)
        .with_context(|| format!("read columns of {}", args.file.display()))?;
    let check = validate_source(&args.file, &options);
    if !check.valid {
        warn!(path = %args.file.display(), reason = %check.message, "source rejected");
    }
    Ok(ColumnsResult {
        path: args.file.clone(),
        columns,
        check,
    })
}

pub fn run_match(args: &MatchArgs, quiet: bool) -> Result<MatchResult> {
    let inputs = Inputs::load(&args.sources)?;
    let span = info_span!("match", left = %inputs.left.name, right = %inputs.right.name);
    let _guard = span.enter();
    let matcher = inputs.matcher()?;
    let registry = MethodRegistry::builtin();
    let mut progress = TerminalProgress::new(quiet);

    let start = Instant::now();
    let (run, ranking) = if args.auto {
        let methods = registry.select(&args.methods)?;
        let selection = auto_select(&matcher, &methods, &mut progress)?;
        info!(method = %selection.run.method, "method chosen automatically");
        (selection.run, Some(selection.ranking))
    } else {
        let method = registry
            .get(&args.method)
            .ok_or_else(|| MatchError::UnknownMethod(args.method.clone()))?;
        (matcher.run(method, &mut progress), None)
    };
    drop(progress);
    info!(
        method = %run.method,
        rows = run.rows.len(),
        mean = run.statistics.mean_score,
        elapsed_ms = start.elapsed().as_millis(),
        "matching finished"
    );
    trace_rows(&run.rows);

    let report = match &args.output {
        Some(path) => {
            let mut options = inputs.report_options(args.export.export);
            if args.export.no_statistics {
                options = options.with_statistics(false);
            }
            let rows = write_results(path, &run.rows, &run.statistics, &options)
                .with_context(|| format!("write results to {}", path.display()))?;
            Some(ReportFile {
                path: path.clone(),
                rows,
            })
        }
        None => None,
    };

    Ok(MatchResult {
        sources: inputs.summary(&matcher),
        ranking,
        run,
        report,
    })
}

pub fn run_compare(args: &CompareArgs, quiet: bool) -> Result<CompareResult> {
    let inputs = Inputs::load(&args.sources)?;
    let span = info_span!("compare", left = %inputs.left.name, right = %inputs.right.name);
    let _guard = span.enter();
    let matcher = inputs.matcher()?;
    let methods = MethodRegistry::builtin().select(&args.methods)?;

    let mut progress = TerminalProgress::new(quiet);
    let ranking = compare_on_sample(&matcher, &methods, &mut progress)?;
    drop(progress);

    if let Some(path) = &args.output {
        write_comparison(path, &ranking)
            .with_context(|| format!("write method ranking to {}", path.display()))?;
        info!(path = %path.display(), methods = ranking.len(), "method ranking written");
    }
    Ok(CompareResult {
        sources: inputs.summary(&matcher),
        sample_size: matcher.config().sample_size.min(matcher.queries().len()),
        ranking,
        output: args.output.clone(),
    })
}

pub fn run_full_compare(args: &FullCompareArgs, quiet: bool) -> Result<FullCompareResult> {
    let inputs = Inputs::load(&args.sources)?;
    let span = info_span!("full_compare", left = %inputs.left.name, right = %inputs.right.name);
    let _guard = span.enter();
    let matcher = inputs.matcher()?;
    let methods = MethodRegistry::builtin().select(&args.methods)?;

    let mut progress = TerminalProgress::new(quiet);
    let runs = compare_full(&matcher, &methods, &mut progress)?;
    drop(progress);

    let options = inputs.report_options(args.export);
    write_full_comparison(&args.output, &runs, &options)
        .with_context(|| format!("write comparison workbook to {}", args.output.display()))?;
    Ok(FullCompareResult {
        sources: inputs.summary(&matcher),
        runs,
        output: args.output.clone(),
    })
}

/// Both tables loaded, with everything needed to build a [`Matcher`].
struct Inputs {
    settings: Settings,
    left: Table,
    right: Table,
    selection1: ColumnSelection,
    selection2: ColumnSelection,
    normalization: NormalizationOptions,
    config: MatchingConfig,
    inheritance: Inheritance,
}

impl Inputs {
    fn load(args: &SourceArgs) -> Result<Self> {
        let settings = load_settings(args.config.as_deref())?;
        let left = load_source(&settings, args, &args.left, args.left_sheet.as_deref())?;
        let right = load_source(&settings, args, &args.right, args.right_sheet.as_deref())?;
        let selection1 = column_selection(&left, &args.left_cols)
            .context("select columns of the first table")?;
        let selection2 = column_selection(&right, &args.right_cols)
            .context("select columns of the second table")?;

        let mut config = settings.matching.clone();
        if let Some(threshold) = args.threshold {
            config = config.with_reject_threshold(threshold);
        }
        if let Some(sample_size) = args.sample_size {
            config = config.with_sample_size(sample_size);
        }
        if config.sample_size == 0 {
            bail!("sample size must be at least 1");
        }

        Ok(Self {
            normalization: normalization_options(settings.normalization, &args.normalization),
            inheritance: Inheritance {
                source1: args.inherit_left,
                source2: args.inherit_right,
            },
            settings,
            left,
            right,
            selection1,
            selection2,
            config,
        })
    }

    fn matcher(&self) -> Result<Matcher<'_>> {
        let request = MatchRequest::new(
            &self.left,
            self.selection1.clone(),
            &self.right,
            self.selection2.clone(),
        )
        .with_normalization(self.normalization)
        .with_config(self.config.clone())
        .with_inheritance(self.inheritance);
        Ok(Matcher::new(request)?)
    }

    fn report_options(&self, export: Option<ExportArg>) -> ReportOptions {
        let filter = export.map_or(self.settings.report.filter, ExportFilter::from);
        ReportOptions::new(self.selection1.display_name(), self.selection2.display_name())
            .with_filter(filter)
            .with_statistics(self.settings.report.include_statistics)
    }

    fn summary(&self, matcher: &Matcher<'_>) -> SourceSummary {
        SourceSummary {
            left: self.left.name.clone(),
            right: self.right.name.clone(),
            left_columns: self.selection1.display_name(),
            right_columns: self.selection2.display_name(),
            left_rows: self.left.len(),
            right_rows: self.right.len(),
            candidates: matcher.pool().len(),
            warnings: matcher.warnings().to_vec(),
        }
    }
}

fn load_source(
    settings: &Settings,
    args: &SourceArgs,
    path: &Path,
    sheet: Option<&str>,
) -> Result<Table> {
    let options = ingest_options(settings, args.delimiter, sheet);
    load_table(path, &options).with_context(|| format!("load {}", path.display()))
}

fn ingest_options(
    settings: &Settings,
    delimiter: Option<char>,
    sheet: Option<&str>,
) -> IngestOptions {
    let mut options = settings.ingest.clone();
    if let Some(delimiter) = delimiter {
        options = options.with_delimiter(delimiter);
    }
    if let Some(sheet) = sheet {
        options = options.with_sheet(sheet);
    }
    options
}

/// Requested columns, or the first column of the table when none are given.
fn column_selection(table: &Table, requested: &[String]) -> Result<ColumnSelection> {
    if requested.is_empty() {
        let first = table
            .columns
            .first()
            .ok_or_else(|| anyhow!("{} has no columns", table.name))?;
        return Ok(ColumnSelection::single(first.clone()));
    }
    let requested = requested.iter().map(|column| column.trim());
    Ok(ColumnSelection::new(requested)?)
}

/// Settings file values with the command-line switches applied on top.
fn normalization_options(
    base: NormalizationOptions,
    args: &NormalizationArgs,
) -> NormalizationOptions {
    NormalizationOptions {
        remove_legal: base.remove_legal || args.remove_legal,
        remove_versions: base.remove_versions || args.remove_versions,
        remove_stopwords: base.remove_stopwords || args.remove_stopwords,
        transliterate: base.transliterate || args.transliterate,
        remove_punctuation: base.remove_punctuation && !args.keep_punctuation,
    }
}

fn trace_rows(rows: &[MatchRow]) {
    for row in rows {
        trace!(
            source1 = redact_value(&row.source1_value),
            source2 = redact_value(&row.source2_value),
            score = row.score,
            "match row"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> NormalizationArgs {
        NormalizationArgs {
            remove_legal: false,
            remove_versions: false,
            remove_stopwords: false,
            transliterate: false,
            keep_punctuation: false,
        }
    }

    #[test]
    fn test_flags_extend_settings() {
        let base = NormalizationOptions::default().with_stopwords(true);
        let args = NormalizationArgs {
            remove_legal: true,
            ..flags()
        };
        let options = normalization_options(base, &args);
        assert!(options.remove_legal);
        assert!(options.remove_stopwords);
        assert!(!options.remove_versions);
        assert!(options.remove_punctuation);
    }

    #[test]
    fn test_keep_punctuation_overrides_settings() {
        let args = NormalizationArgs {
            keep_punctuation: true,
            ..flags()
        };
        let options = normalization_options(NormalizationOptions::default(), &args);
        assert!(!options.remove_punctuation);
    }

    #[test]
    fn test_default_selection_is_first_column() {
        let table = Table::new("inventory.csv", vec!["Name".into(), "Vendor".into()]);
        let selection = column_selection(&table, &[]).unwrap();
        assert_eq!(selection.columns(), ["Name"]);

        let selection = column_selection(&table, &[" Name".into(), "Vendor ".into()]).unwrap();
        assert_eq!(selection.display_name(), "Name + Vendor");
    }

    #[test]
    fn test_selection_of_table_without_columns_fails() {
        let table = Table::new("empty.csv", Vec::new());
        let err = column_selection(&table, &[]).unwrap_err();
        assert_eq!(err.to_string(), "empty.csv has no columns");
    }
}
