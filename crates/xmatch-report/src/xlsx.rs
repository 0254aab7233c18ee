//! Styled XLSX output.

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use xmatch_model::{MatchRow, MatchStatistics, ScoreBand};

use crate::error::{ReportError, Result};
use crate::layout::{Cell, ResultLayout};

/// Excel's limit on sheet name length, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const HEADER_FILL: u32 = 0x7C3AED;
const INVALID_SHEET_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

pub(crate) fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_font_color(Color::White)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn band_format(band: ScoreBand) -> Format {
    Format::new()
        .set_background_color(Color::RGB(band.fill_rgb()))
        .set_border(FormatBorder::Thin)
}

pub(crate) fn xlsx_error(path: &Path) -> impl FnOnce(XlsxError) -> ReportError + '_ {
    move |source| ReportError::Xlsx {
        path: path.to_path_buf(),
        source,
    }
}

/// Make `name` usable as a worksheet name.
///
/// Characters Excel rejects become `_`, control characters are dropped and
/// names longer than 31 characters are cut to 28 plus `...`.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    if cleaned.is_empty() {
        return "Sheet1".to_string();
    }
    if cleaned.chars().count() > MAX_SHEET_NAME_LEN {
        let head: String = cleaned.chars().take(MAX_SHEET_NAME_LEN - 3).collect();
        format!("{head}...")
    } else {
        cleaned.to_string()
    }
}

/// Sanitize `names` and make them unique, case-insensitively, as Excel requires.
pub fn unique_sheet_names<'a, I>(names: I, reserved: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = reserved.iter().map(|name| name.to_lowercase()).collect();
    let mut result = Vec::new();
    for name in names {
        let base = sanitize_sheet_name(name);
        let mut candidate = base.clone();
        let mut counter = 2;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({counter})");
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            let head: String = base.chars().take(keep).collect();
            candidate = format!("{head}{suffix}");
            counter += 1;
        }
        taken.insert(candidate.to_lowercase());
        result.push(candidate);
    }
    result
}

pub(crate) fn write_header<'a>(
    worksheet: &mut Worksheet,
    headers: impl IntoIterator<Item = &'a str>,
) -> std::result::Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Write a header plus one band-coloured line per row.
pub(crate) fn write_results_sheet(
    worksheet: &mut Worksheet,
    layout: &ResultLayout,
    rows: &[&MatchRow],
) -> std::result::Result<(), XlsxError> {
    write_header(worksheet, layout.headers())?;
    for (col, kind) in layout.kinds().enumerate() {
        worksheet.set_column_width(col as u16, kind.width())?;
    }

    // Indexed by band discriminant, which follows `ScoreBand::ALL`.
    let formats = ScoreBand::ALL.map(band_format);
    for (index, row) in rows.iter().enumerate() {
        let format = &formats[row.band() as usize];
        let line = index as u32 + 1;
        for (col, cell) in layout.cells(index + 1, row).into_iter().enumerate() {
            match cell {
                Cell::Number(value) => {
                    worksheet.write_number_with_format(line, col as u16, value, format)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string_with_format(line, col as u16, text, format)?;
                }
            }
        }
    }
    if !rows.is_empty() && !layout.is_empty() {
        worksheet.autofilter(0, 0, rows.len() as u32, layout.len() as u16 - 1)?;
    }
    Ok(())
}

/// Band counts, percentages and the check-sum line.
pub(crate) fn write_statistics_sheet(
    worksheet: &mut Worksheet,
    stats: &MatchStatistics,
) -> std::result::Result<(), XlsxError> {
    write_header(worksheet, ["Category", "Count", "Percent"])?;
    worksheet.set_column_width(0, 32)?;
    worksheet.set_column_width(1, 12)?;
    worksheet.set_column_width(2, 12)?;

    worksheet.write_string(1, 0, "Total rows")?;
    worksheet.write_number(1, 1, stats.total as f64)?;
    worksheet.write_string(1, 2, "100%")?;

    let mut line = 2;
    for band in ScoreBand::ALL {
        let format = band_format(band);
        let label = format!("{} ({})", band.label(), band.description().to_lowercase());
        worksheet.write_string_with_format(line, 0, label, &format)?;
        worksheet.write_number_with_format(line, 1, stats.count(band) as f64, &format)?;
        worksheet.write_string_with_format(
            line,
            2,
            format!("{:.1}%", stats.percentage(band)),
            &format,
        )?;
        line += 1;
    }

    for col in 0..3 {
        worksheet.write_string(line, col, "---")?;
    }
    line += 1;
    worksheet.write_string(line, 0, "Check sum")?;
    worksheet.write_number(line, 1, stats.check_sum as f64)?;
    worksheet.write_string(
        line,
        2,
        if stats.is_consistent() { "OK" } else { "MISMATCH" },
    )?;
    Ok(())
}

/// Results sheet plus an optional statistics sheet.
pub(crate) fn write_results_workbook(
    path: &Path,
    layout: &ResultLayout,
    rows: &[&MatchRow],
    stats: Option<&MatchStatistics>,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let results = workbook
        .add_worksheet()
        .set_name("Results")
        .map_err(xlsx_error(path))?;
    write_results_sheet(results, layout, rows).map_err(xlsx_error(path))?;

    if let Some(stats) = stats {
        let sheet = workbook
            .add_worksheet()
            .set_name("Statistics")
            .map_err(xlsx_error(path))?;
        write_statistics_sheet(sheet, stats).map_err(xlsx_error(path))?;
    }
    workbook.save(path).map_err(xlsx_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Token Set [RapidFuzz]"), "Token Set _RapidFuzz_");
        assert_eq!(sanitize_sheet_name("  "), "Sheet1");
        let long = sanitize_sheet_name("Partial Token Sort Ratio (RapidFuzz library)");
        assert_eq!(long.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(long.ends_with("..."));
    }

    #[test]
    fn test_unique_sheet_names() {
        let names = unique_sheet_names(["Ratio", "ratio", "Summary"], &["Summary"]);
        assert_eq!(names, ["Ratio", "ratio (2)", "Summary (2)"]);
    }

    #[test]
    fn test_unique_names_stay_within_limit() {
        let long = "A method name that is far too long for Excel";
        let names = unique_sheet_names([long, long], &[]);
        assert_eq!(names[0].chars().count(), MAX_SHEET_NAME_LEN);
        assert_eq!(names[1].chars().count(), MAX_SHEET_NAME_LEN);
        assert!(names[1].ends_with(" (2)"));
        assert_ne!(names[0], names[1]);
    }
}
