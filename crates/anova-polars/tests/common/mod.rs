//! Common test utilities for anova-polars tests

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Three groups of ten scores: A = 1..=10, B = A + 2, C = A + 5
///
/// Between SS 126.667 on 2 df, within SS 247.5 on 27 df, F = 6.909.
pub fn three_group_df() -> DataFrame {
    let mut scores = Vec::with_capacity(30);
    let mut groups = Vec::with_capacity(30);
    for (label, shift) in [("A", 0.0), ("B", 2.0), ("C", 5.0)] {
        for i in 1..=10 {
            scores.push(i as f64 + shift);
            groups.push(label);
        }
    }
    df!["Score" => scores, "Group" => groups].unwrap()
}

/// Balanced 2x2 crop trial with two replicates per cell
///
/// Type II SS: Soil Type 18, Water Level 72, interaction 8, residual 8 on 4 df.
pub fn crop_trial_df() -> DataFrame {
    df![
        "Crop Yield" => [1.0, 3.0, 5.0, 7.0, 2.0, 4.0, 10.0, 12.0],
        "Soil Type" => ["clay", "clay", "clay", "clay", "loam", "loam", "loam", "loam"],
        "Water Level" => ["low", "low", "high", "high", "low", "low", "high", "high"],
    ]
    .unwrap()
}

/// Three groups whose variances differ by a factor of four
///
/// Welch F = 7.2 on (2, 7.111) df.
pub fn unequal_variance_df() -> DataFrame {
    df![
        "y" => [1.0, 2.0, 3.0, 4.0, 5.0, 2.0, 4.0, 6.0, 8.0, 10.0, 5.0, 7.0, 9.0, 11.0, 13.0],
        "g" => ["a", "a", "a", "a", "a", "b", "b", "b", "b", "b", "c", "c", "c", "c", "c"],
    ]
    .unwrap()
}

/// Normal samples per group, one `(label, mean, std, n)` tuple each
pub fn grouped_normal_df(groups: &[(&str, f64, f64, usize)], seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut values = Vec::new();
    let mut labels = Vec::new();
    for &(label, mean, std, n) in groups {
        let normal = Normal::new(mean, std).unwrap();
        for _ in 0..n {
            values.push(normal.sample(&mut rng));
            labels.push(label.to_string());
        }
    }
    df!["value" => values, "group" => labels].unwrap()
}

/// Float value at `row` of `column`
pub fn float_at(df: &DataFrame, column: &str, row: usize) -> f64 {
    df.column(column)
        .unwrap()
        .f64()
        .unwrap()
        .get(row)
        .unwrap_or(f64::NAN)
}

/// String value at `row` of `column`
pub fn text_at(df: &DataFrame, column: &str, row: usize) -> String {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .get(row)
        .unwrap()
        .to_string()
}
