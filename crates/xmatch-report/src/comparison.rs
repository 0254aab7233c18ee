//! Method comparison workbooks.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::info;
use xmatch_map::{MethodComparison, MethodRun};
use xmatch_model::ScoreBand;

use crate::csv_out::write_table_csv;
use crate::error::{ReportError, Result};
use crate::is_xlsx_path;
use crate::layout::ResultLayout;
use crate::options::ReportOptions;
use crate::xlsx::{unique_sheet_names, write_header, write_results_sheet, xlsx_error};

const SUMMARY_SHEET: &str = "Summary";
const COMPARISON_SHEET: &str = "Method comparison";

/// Header of a ranking table.
pub fn ranking_headers() -> Vec<&'static str> {
    let mut headers = vec!["Place", "Method", "Library", "Total"];
    headers.extend(ScoreBand::ALL.iter().map(|band| band.label()));
    headers.extend(["Mean %", "Seconds"]);
    headers
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// One ranking line: place, names, counts, mean (1 decimal) and seconds (2 decimals).
pub fn ranking_record(place: usize, comparison: &MethodComparison) -> Vec<String> {
    let stats = &comparison.statistics;
    let mut record = vec![
        place.to_string(),
        comparison.method.clone(),
        comparison.library.clone(),
        stats.total.to_string(),
    ];
    record.extend(ScoreBand::ALL.iter().map(|&band| stats.count(band).to_string()));
    record.push(format!("{:.1}", round_to(stats.mean_score, 1)));
    record.push(format!("{:.2}", comparison.elapsed.as_secs_f64()));
    record
}

fn write_ranking_sheet(
    worksheet: &mut Worksheet,
    comparisons: &[MethodComparison],
) -> std::result::Result<(), XlsxError> {
    let headers = ranking_headers();
    write_header(worksheet, headers.iter().copied())?;
    worksheet.set_column_width(0, 10)?;
    worksheet.set_column_width(1, 40)?;
    for col in 2..headers.len() {
        worksheet.set_column_width(col as u16, 15)?;
    }

    for (index, comparison) in comparisons.iter().enumerate() {
        let line = index as u32 + 1;
        let stats = &comparison.statistics;
        worksheet.write_number(line, 0, (index + 1) as f64)?;
        worksheet.write_string(line, 1, comparison.method.as_str())?;
        worksheet.write_string(line, 2, comparison.library.as_str())?;
        worksheet.write_number(line, 3, stats.total as f64)?;
        for (offset, band) in ScoreBand::ALL.iter().enumerate() {
            worksheet.write_number(line, 4 + offset as u16, stats.count(*band) as f64)?;
        }
        worksheet.write_number(line, 10, round_to(stats.mean_score, 1))?;
        worksheet.write_number(line, 11, round_to(comparison.elapsed.as_secs_f64(), 2))?;
    }
    Ok(())
}

/// Write a method ranking, best first, as XLSX or CSV depending on the extension.
pub fn write_comparison(path: &Path, comparisons: &[MethodComparison]) -> Result<()> {
    if comparisons.is_empty() {
        return Err(ReportError::NothingToExport);
    }
    if is_xlsx_path(path) {
        let mut workbook = Workbook::new();
        let sheet = workbook
            .add_worksheet()
            .set_name(COMPARISON_SHEET)
            .map_err(xlsx_error(path))?;
        write_ranking_sheet(sheet, comparisons).map_err(xlsx_error(path))?;
        workbook.save(path).map_err(xlsx_error(path))?;
    } else {
        let records: Vec<Vec<String>> = comparisons
            .iter()
            .enumerate()
            .map(|(index, comparison)| ranking_record(index + 1, comparison))
            .collect();
        write_table_csv(path, &ranking_headers(), &records)?;
    }
    info!(path = %path.display(), methods = comparisons.len(), "method comparison written");
    Ok(())
}

/// Write a summary sheet plus one results sheet per method.
///
/// `runs` should already be ranked; the summary keeps their order.
pub fn write_full_comparison(path: &Path, runs: &[MethodRun], options: &ReportOptions) -> Result<()> {
    if runs.is_empty() {
        return Err(ReportError::NothingToExport);
    }
    let mut workbook = Workbook::new();

    let comparisons: Vec<MethodComparison> = runs.iter().map(MethodRun::comparison).collect();
    let summary = workbook
        .add_worksheet()
        .set_name(SUMMARY_SHEET)
        .map_err(xlsx_error(path))?;
    write_ranking_sheet(summary, &comparisons).map_err(xlsx_error(path))?;

    let names = unique_sheet_names(runs.iter().map(|run| run.method.as_str()), &[SUMMARY_SHEET]);
    for (run, name) in runs.iter().zip(names) {
        let rows = options.filter.apply(&run.rows);
        let layout = ResultLayout::new(
            &options.source1_label,
            &options.source2_label,
            run.rows.first(),
        );
        let sheet = workbook
            .add_worksheet()
            .set_name(name)
            .map_err(xlsx_error(path))?;
        write_results_sheet(sheet, &layout, &rows).map_err(xlsx_error(path))?;
    }

    workbook.save(path).map_err(xlsx_error(path))?;
    info!(path = %path.display(), methods = runs.len(), "full comparison written");
    Ok(())
}
