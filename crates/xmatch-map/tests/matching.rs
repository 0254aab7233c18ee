//! End-to-end matching passes over small in-memory tables.

use std::collections::BTreeMap;

use xmatch_map::{
    CandidatePool, Inheritance, MatchRequest, Matcher, MatchingConfig, MethodRegistry,
    NoProgress, ProgressSink, ScoringError, ScoringMethod, auto_select, compare_full,
    compare_on_sample,
};
use xmatch_model::{CellValue, ColumnSelection, MatchStatistics, ScoreBand, Table};
use xmatch_normalization::NormalizationOptions;

fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(name, columns.iter().map(ToString::to_string).collect());
    for row in rows {
        table.push_values(row.iter().map(|value| CellValue::from_text(value)).collect());
    }
    table
}

fn inventory() -> Table {
    table(
        "inventory.csv",
        &["Name", "Owner"],
        &[
            &["Microsoft Office", "finance"],
            &["Adobe Acrobat Reader", "legal"],
            &["nginx", "ops"],
            &["r", "research"],
            &["Totally Unrelated Thing", "nobody"],
        ],
    )
}

fn catalog() -> Table {
    table(
        "catalog.csv",
        &["Product", "Vendor"],
        &[
            &["microsoft office", "Microsoft"],
            &["Adobe Acrobat Reader DC", "Adobe"],
            &["NGINX", "F5"],
            &["proficy ifix", "GE"],
            &["sap bis", "SAP"],
            &["studio", "JetBrains"],
        ],
    )
}

fn request<'a>(left: &'a Table, right: &'a Table) -> MatchRequest<'a> {
    MatchRequest::new(
        left,
        ColumnSelection::single("Name"),
        right,
        ColumnSelection::single("Product"),
    )
}

#[test]
fn short_query_does_not_match_long_names() {
    let registry = MethodRegistry::builtin();
    let config = MatchingConfig::default();
    let pool = CandidatePool::from_normalized(["proficy ifix", "nginx", "sap bis", "studio"]);
    for method in registry.methods() {
        let outcome = method.find_best_match("r", &pool, &config);
        assert_eq!(outcome.value(), "", "{} matched", method.name());
        assert_eq!(outcome.score, 0.0, "{} scored", method.name());
    }
}

#[test]
fn exact_single_character_still_matches() {
    let registry = MethodRegistry::builtin();
    let config = MatchingConfig::default();
    let pool =
        CandidatePool::from_normalized(["proficy ifix", "nginx", "sap bis", "r", "studio"]);
    let method = registry.get("exact").unwrap();
    let outcome = method.find_best_match("r", &pool, &config);
    assert_eq!(outcome.value(), "r");
    assert_eq!(outcome.score, 100.0);
}

#[test]
fn wratio_pass_produces_sorted_rows() {
    let left = inventory();
    let right = catalog();
    let matcher = Matcher::new(request(&left, &right)).unwrap();
    let method = MethodRegistry::builtin().get("wratio").cloned().unwrap();
    let run = matcher.run(&method, &mut NoProgress);

    assert_eq!(run.rows.len(), 5);
    assert_eq!(run.method, "WRatio");
    assert!(run.rows.windows(2).all(|pair| pair[0].score >= pair[1].score));

    let by_source: BTreeMap<&str, (&str, f64)> = run
        .rows
        .iter()
        .map(|row| {
            (
                row.source1_value.as_str(),
                (row.source2_value.as_str(), row.score),
            )
        })
        .collect();
    assert_eq!(by_source["Microsoft Office"], ("microsoft office", 100.0));
    assert_eq!(by_source["nginx"], ("NGINX", 100.0));
    assert_eq!(by_source["r"], ("", 0.0));
    assert_eq!(by_source["Adobe Acrobat Reader"].0, "Adobe Acrobat Reader DC");

    assert!(run.statistics.is_consistent());
    assert_eq!(run.statistics.total, 5);
    assert_eq!(run.statistics.perfect, 2);
}

#[test]
fn rows_below_floor_have_no_match() {
    let left = inventory();
    let right = catalog();
    let matcher = Matcher::new(request(&left, &right)).unwrap();
    for method in MethodRegistry::builtin().methods() {
        let run = matcher.run(method, &mut NoProgress);
        for row in &run.rows {
            if row.score < 50.0 {
                assert!(row.source2_value.is_empty(), "{}: {row:?}", method.name());
                assert_eq!(row.score, 0.0);
            } else {
                assert!(row.is_matched());
            }
        }
    }
}

#[test]
fn inherited_columns_follow_the_match() {
    let left = inventory();
    let right = catalog();
    let req = request(&left, &right).with_inheritance(Inheritance {
        source1: true,
        source2: true,
    });
    let matcher = Matcher::new(req).unwrap();
    let run = matcher.run(&ScoringMethod::exact(), &mut NoProgress);

    let office = run
        .rows
        .iter()
        .find(|row| row.source1_value == "Microsoft Office")
        .unwrap();
    assert_eq!(office.source1_fields, [("Owner".to_string(), "finance".to_string())]);
    assert_eq!(
        office.source2_fields,
        [("Vendor".to_string(), "Microsoft".to_string())]
    );

    let unmatched = run
        .rows
        .iter()
        .find(|row| row.source1_value == "Totally Unrelated Thing")
        .unwrap();
    assert_eq!(unmatched.source2_fields, [("Vendor".to_string(), String::new())]);
}

#[test]
fn duplicate_candidates_report_first_row() {
    let left = table("l", &["Name"], &[&["Nginx"]]);
    let right = table(
        "r",
        &["Product", "Vendor"],
        &[&["NGINX", "first"], &["nginx", "second"]],
    );
    let req = request(&left, &right).with_inheritance(Inheritance {
        source1: false,
        source2: true,
    });
    let run = Matcher::new(req)
        .unwrap()
        .run(&ScoringMethod::exact(), &mut NoProgress);
    assert_eq!(run.rows[0].source2_value, "NGINX");
    assert_eq!(run.rows[0].source2_fields[0].1, "first");
}

#[test]
fn normalization_options_change_results() {
    let left = table("l", &["Name"], &[&["ACME LLC 2021"]]);
    let right = table("r", &["Product"], &[&["acme"]]);
    let exact = ScoringMethod::exact();

    let plain = Matcher::new(request(&left, &right)).unwrap();
    assert_eq!(plain.run(&exact, &mut NoProgress).rows[0].score, 0.0);

    let cleaned = Matcher::new(request(&left, &right).with_normalization(
        NormalizationOptions::default()
            .with_legal(true)
            .with_versions(true),
    ))
    .unwrap();
    let row = &cleaned.run(&exact, &mut NoProgress).rows[0];
    assert_eq!(row.score, 100.0);
    assert_eq!(row.source1_value, "ACME LLC 2021");
    assert_eq!(row.source2_value, "acme");
}

#[test]
fn failing_custom_scorer_never_aborts() {
    let left = inventory();
    let right = catalog();
    let matcher = Matcher::new(request(&left, &right)).unwrap();
    let flaky = ScoringMethod::custom("flaky", "Flaky", |a, b| {
        if b.starts_with('s') {
            Err(ScoringError::Custom("unsupported".into()))
        } else if a == b {
            Ok(1.0)
        } else {
            Ok(0.0)
        }
    });
    let run = matcher.run(&flaky, &mut NoProgress);
    assert_eq!(run.rows.len(), 5);
    assert!(run.failures > 0);
    assert_eq!(run.statistics.perfect, 2);
}

#[test]
fn invalid_selection_is_rejected_before_matching() {
    let left = inventory();
    let right = catalog();
    let req = MatchRequest::new(
        &left,
        ColumnSelection::single("Missing"),
        &right,
        ColumnSelection::single("Product"),
    );
    let err = Matcher::new(req).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid column selection for source 1: column 'Missing' not found in inventory.csv"
    );
}

#[test]
fn unequal_column_counts_warn() {
    let left = inventory();
    let right = catalog();
    let req = MatchRequest::new(
        &left,
        ColumnSelection::new(["Name", "Owner"]).unwrap(),
        &right,
        ColumnSelection::single("Product"),
    );
    let matcher = Matcher::new(req).unwrap();
    assert_eq!(matcher.warnings().len(), 1);
}

#[test]
fn empty_source_is_rejected() {
    let left = Table::new("empty", vec!["Name".into()]);
    let right = catalog();
    assert!(Matcher::new(request(&left, &right)).is_err());
}

#[derive(Default)]
struct Recorder {
    ticks: Vec<(usize, usize)>,
    finished: Vec<String>,
}

impl ProgressSink for Recorder {
    fn rows_processed(&mut self, _method: &str, done: usize, total: usize) {
        self.ticks.push((done, total));
    }

    fn method_finished(&mut self, method: &str, _statistics: &MatchStatistics) {
        self.finished.push(method.to_string());
    }
}

#[test]
fn progress_is_reported_every_ten_rows() {
    let names: Vec<String> = (0..25).map(|i| format!("item {i}")).collect();
    let mut left = Table::new("l", vec!["Name".to_string()]);
    for name in &names {
        left.push_values(vec![CellValue::from_text(name)]);
    }
    let right = catalog();
    let matcher = Matcher::new(request(&left, &right)).unwrap();
    let mut recorder = Recorder::default();
    matcher.run(&ScoringMethod::exact(), &mut recorder);
    assert_eq!(recorder.ticks, [(10, 25), (20, 25), (25, 25)]);
    assert_eq!(recorder.finished, ["Exact Match"]);
}

#[test]
fn auto_mode_agrees_with_compare_mode() {
    let left = inventory();
    let right = catalog();
    let matcher = Matcher::new(request(&left, &right)).unwrap();
    let methods = MethodRegistry::builtin().methods().to_vec();

    let sample = compare_on_sample(&matcher, &methods, &mut NoProgress).unwrap();
    let auto = auto_select(&matcher, &methods, &mut NoProgress).unwrap();
    let full = compare_full(&matcher, &methods, &mut NoProgress).unwrap();

    let sample_order: Vec<&str> = sample.iter().map(|c| c.method_id.as_str()).collect();
    let full_order: Vec<&str> = full.iter().map(|r| r.method_id.as_str()).collect();
    // The sample covers every row here, so both rankings see the same statistics.
    assert_eq!(sample_order, full_order);
    assert_eq!(auto.run.method_id, sample_order[0]);
    assert_eq!(auto.run.statistics, full[0].statistics);
    assert_eq!(auto.ranking.len(), sample.len());
}

#[test]
fn sample_limits_rows() {
    let left = inventory();
    let right = catalog();
    let req = request(&left, &right).with_config(MatchingConfig::default().with_sample_size(2));
    let matcher = Matcher::new(req).unwrap();
    let ranking =
        compare_on_sample(&matcher, &[ScoringMethod::exact()], &mut NoProgress).unwrap();
    assert_eq!(ranking[0].statistics.total, 2);
}

#[test]
fn no_methods_is_an_error() {
    let left = inventory();
    let right = catalog();
    let matcher = Matcher::new(request(&left, &right)).unwrap();
    assert!(compare_on_sample(&matcher, &[], &mut NoProgress).is_err());
    assert!(compare_full(&matcher, &[], &mut NoProgress).is_err());
}

#[test]
fn statistics_snapshot() {
    let stats = xmatch_map::aggregate_scores([100.0, 100.0, 95.0, 80.0, 60.0, 30.0, 0.0, 15.0]);
    assert_eq!(stats.mean_score, 60.0);
    let counts: BTreeMap<&str, usize> = ScoreBand::ALL
        .iter()
        .map(|&band| (band.label(), stats.count(band)))
        .collect();
    insta::assert_json_snapshot!(counts, @r#"
    {
      "0%": 1,
      "1-49%": 2,
      "100%": 2,
      "50-69%": 1,
      "70-89%": 1,
      "90-99%": 1
    }
    "#);
}
