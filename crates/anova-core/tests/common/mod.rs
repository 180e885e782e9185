//! Common test utilities for anova-core tests

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Balanced 2x2 design with two replicates per cell
///
/// Cell means: (a1,b1)=2, (a1,b2)=6, (a2,b1)=3, (a2,b2)=11.
pub fn balanced_two_way_df() -> DataFrame {
    df![
        "y" => [1.0, 3.0, 5.0, 7.0, 2.0, 4.0, 10.0, 12.0],
        "a" => ["a1", "a1", "a1", "a1", "a2", "a2", "a2", "a2"],
        "b" => ["b1", "b1", "b2", "b2", "b1", "b1", "b2", "b2"],
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
