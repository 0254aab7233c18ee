use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xmatch_map::{MethodComparison, MethodRun};
use xmatch_model::{MatchRow, MatchStatistics, ScoreBand};

use crate::types::{ColumnsResult, CompareResult, FullCompareResult, MatchResult, SourceSummary};

pub fn print_columns(result: &ColumnsResult) {
    println!("File: {}", result.path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, column) in result.columns.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(column)]);
    }
    println!("{table}");
    if result.check.valid {
        println!("OK: {}", result.check.message);
    } else {
        println!("Not usable: {}", result.check.message);
    }
}

pub fn print_match(result: &MatchResult, preview: usize) {
    print_sources(&result.sources);
    if let Some(ranking) = &result.ranking {
        println!("Sample ranking:");
        println!("{}", ranking_table(ranking));
    }
    let run = &result.run;
    println!(
        "Method: {} ({}), {:.2}s",
        run.method,
        run.library,
        run.elapsed.as_secs_f64()
    );
    if run.failures > 0 {
        println!("Scoring failures: {}", run.failures);
    }
    println!("{}", statistics_table(&run.statistics));
    if preview > 0 && !run.rows.is_empty() {
        println!("{}", preview_table(&run.rows, preview));
    }
    if let Some(report) = &result.report {
        println!("Report: {} ({} rows)", report.path.display(), report.rows);
    }
}

pub fn print_compare(result: &CompareResult) {
    print_sources(&result.sources);
    println!("Sample: first {} rows", result.sample_size);
    println!("{}", ranking_table(&result.ranking));
    if let Some(path) = &result.output {
        println!("Ranking: {}", path.display());
    }
}

pub fn print_full_compare(result: &FullCompareResult) {
    print_sources(&result.sources);
    let comparisons: Vec<MethodComparison> = result.runs.iter().map(MethodRun::comparison).collect();
    println!("{}", ranking_table(&comparisons));
    println!("Workbook: {}", result.output.display());
}

fn print_sources(sources: &SourceSummary) {
    println!(
        "Source 1: {} [{}], {} rows",
        sources.left, sources.left_columns, sources.left_rows
    );
    println!(
        "Source 2: {} [{}], {} rows, {} distinct candidates",
        sources.right, sources.right_columns, sources.right_rows, sources.candidates
    );
    for warning in &sources.warnings {
        println!("Warning: {warning}");
    }
}

/// Band counts with percentages and a total row.
pub fn statistics_table(statistics: &MatchStatistics) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Band"),
        header_cell("Description"),
        header_cell("Count"),
        header_cell("Percent"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for band in ScoreBand::ALL {
        let count = statistics.count(band);
        table.add_row(vec![
            Cell::new(band.label()).fg(band_color(band)),
            Cell::new(band.description()),
            count_cell(Some(count), band_color(band)),
            dim_cell(format!("{:.1}%", statistics.percentage(band))),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("mean {:.1}%", statistics.mean_score))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(statistics.total).add_attribute(Attribute::Bold),
        check_sum_cell(statistics),
    ]);
    table
}

/// Methods best first, one column per band.
pub fn ranking_table(ranking: &[MethodComparison]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#"), header_cell("Method"), header_cell("Library")];
    header.extend(ScoreBand::ALL.map(|band| header_cell(band.label())));
    header.push(header_cell("Mean"));
    header.push(header_cell("Seconds"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 3..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (place, entry) in ranking.iter().enumerate() {
        let method = if place == 0 {
            Cell::new(&entry.method)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&entry.method)
        };
        let mut row = vec![dim_cell(place + 1), method, dim_cell(&entry.library)];
        row.extend(ScoreBand::ALL.map(|band| {
            count_cell(Some(entry.statistics.count(band)), band_color(band))
        }));
        row.push(Cell::new(format!("{:.1}", entry.statistics.mean_score)));
        row.push(dim_cell(format!("{:.2}", entry.elapsed.as_secs_f64())));
        table.add_row(row);
    }
    table
}

fn preview_table(rows: &[MatchRow], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source 1"),
        header_cell("Source 2"),
        header_cell("Match %"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows.iter().take(limit) {
        let color = band_color(row.band());
        table.add_row(vec![
            Cell::new(&row.source1_value),
            if row.is_matched() {
                Cell::new(&row.source2_value)
            } else {
                dim_cell("-")
            },
            Cell::new(format!("{:.1}", row.score)).fg(color),
        ]);
    }
    if rows.len() > limit {
        table.add_row(vec![
            dim_cell(format!("... {} more", rows.len() - limit)),
            dim_cell(""),
            dim_cell(""),
        ]);
    }
    table
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Perfect => Color::Green,
        ScoreBand::High => Color::DarkGreen,
        ScoreBand::Medium => Color::Yellow,
        ScoreBand::Low => Color::DarkYellow,
        ScoreBand::VeryLow => Color::Red,
        ScoreBand::None => Color::DarkGrey,
    }
}

fn check_sum_cell(statistics: &MatchStatistics) -> Cell {
    if statistics.is_consistent() {
        dim_cell("check OK")
    } else {
        Cell::new(format!("check sum {}", statistics.check_sum))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statistics() -> MatchStatistics {
        MatchStatistics {
            total: 4,
            perfect: 2,
            high: 1,
            medium: 0,
            low: 0,
            very_low: 0,
            none: 1,
            mean_score: 72.5,
            check_sum: 4,
        }
    }

    #[test]
    fn test_statistics_table_has_band_rows_and_total() {
        let table = statistics_table(&statistics());
        assert_eq!(table.row_iter().count(), ScoreBand::ALL.len() + 1);
        let text = table.to_string();
        assert!(text.contains("90-99%"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("check OK"));
    }

    #[test]
    fn test_ranking_table_columns() {
        let entry = MethodComparison {
            method_id: "wratio".to_string(),
            method: "WRatio".to_string(),
            library: "rapidfuzz".to_string(),
            statistics: statistics(),
            failures: 0,
            elapsed: std::time::Duration::from_millis(250),
        };
        let mut table = ranking_table(&[entry]);
        assert_eq!(table.column_count(), 11);
        assert!(table.to_string().contains("WRatio"));
    }
}
