//! Tests for edge cases and error handling

mod common;

use anova_polars::{one_way_anova, AnovaReportExt, Error, ReportConfig, DEFAULT_ALPHA};
use common::*;
use polars::prelude::*;

#[test]
fn test_unknown_column_error() {
    let df = three_group_df();

    let result = df.one_way_anova(&["Missing Metric"], &["Group"]);
    assert!(matches!(
        result,
        Err(Error::Model(anova_core::Error::UnknownColumn(ref name))) if name == "MissingMetric"
    ));

    assert!(df.two_way_anova(&["Score"], "Group", "Nope").is_err());
    assert!(df.welch_anova(&["Score"], &["Nope"]).is_err());
}

#[test]
fn test_non_numeric_metric_error() {
    let mut df = three_group_df();
    let labels: Vec<String> = (0..df.height()).map(|i| format!("id{i}")).collect();
    df.with_column(Series::new("Label".into(), labels)).unwrap();
    let result = df.one_way_anova(&["Label"], &["Group"]);
    assert!(matches!(
        result,
        Err(Error::Model(anova_core::Error::TypeMismatch { .. }))
    ));
}

#[test]
fn test_input_frame_unchanged() {
    let df = crop_trial_df();
    let before = df.clone();

    df.one_way_anova(&["Crop Yield"], &["Soil Type"]).unwrap();
    df.two_way_anova(&["Crop Yield"], "Soil Type", "Water Level")
        .unwrap();
    df.welch_anova(&["Crop Yield"], &["Water Level"]).unwrap();

    assert!(df.equals(&before));
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Crop Yield", "Soil Type", "Water Level"]);
}

#[test]
fn test_unreferenced_colliding_names_ignored() {
    let df = df![
        "score 1" => [1.0, 2.0, 3.0, 4.0, 6.0, 7.0],
        "score 2" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        "2020" => [1, 2, 3, 4, 5, 6],
        "2021" => [1, 2, 3, 4, 5, 6],
        "group" => ["a", "a", "a", "b", "b", "b"],
    ]
    .unwrap();

    let one_way = df.one_way_anova(&["score 1"], &["group"]).unwrap();
    assert_eq!(one_way.height(), 2);
    assert_eq!(text_at(&one_way, "Variable", 0), "score 1");
    assert_eq!(text_at(&one_way, "Source", 0), "C(group)");

    let welch = df.welch_anova(&["score 1"], &["group"]).unwrap();
    assert_eq!(welch.height(), 1);
}

#[test]
fn test_referenced_colliding_names_error() {
    let df = df![
        "score 1" => [1.0, 2.0, 3.0, 4.0],
        "score 2" => [1.0, 2.0, 3.0, 5.0],
        "group" => ["a", "a", "b", "b"],
    ]
    .unwrap();
    assert!(matches!(
        df.one_way_anova(&["score 1", "score 2"], &["group"]),
        Err(Error::Polars(_))
    ));
}

#[test]
fn test_alpha_changes_interpretation() {
    let df = three_group_df();
    assert_eq!(ReportConfig::default().alpha, DEFAULT_ALPHA);

    let strict = ReportConfig::default().with_alpha(0.001).unwrap();
    let report = df.one_way_anova_with(&["Score"], &["Group"], &strict).unwrap();
    assert_eq!(text_at(&report, "Interpretation", 0), "No significant");

    let loose = ReportConfig::default().with_alpha(0.01).unwrap();
    let report = df.one_way_anova_with(&["Score"], &["Group"], &loose).unwrap();
    assert_eq!(text_at(&report, "Interpretation", 0), "Significant");
}

#[test]
fn test_invalid_alpha_rejected() {
    let df = three_group_df();
    let config = ReportConfig {
        alpha: 1.5,
        ..ReportConfig::default()
    };
    assert!(matches!(
        one_way_anova(&df, &["Score"], &["Group"], &config),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn test_missing_values_dropped() {
    let df = df![
        "Score" => [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0), Some(f64::NAN), Some(9.0)],
        "Group" => [Some("a"), Some("a"), Some("a"), Some("b"), Some("b"), None, Some("c"), Some("c")],
    ]
    .unwrap();
    let report = df.one_way_anova(&["Score"], &["Group"]).unwrap();
    // rows kept: a{1,2}, b{4,5}, c{9}
    assert_eq!(float_at(&report, "df", 0), 2.0);
    assert_eq!(float_at(&report, "df", 1), 2.0);
}

#[test]
fn test_integer_metric_accepted() {
    let df = df![
        "Count" => [1i64, 2, 3, 7, 8, 9],
        "Group" => ["x", "x", "x", "y", "y", "y"],
    ]
    .unwrap();
    let report = df.one_way_anova(&["Count"], &["Group"]).unwrap();
    assert_eq!(report.height(), 2);
    assert_eq!(text_at(&report, "Interpretation", 0), "Significant");
}
