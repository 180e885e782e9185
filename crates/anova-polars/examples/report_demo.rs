//! ANOVA report walkthrough
//!
//! Run with: RUST_LOG=anova_core=debug cargo run -p anova-polars --example report_demo

use anova_polars::{AnovaReportExt, ReportConfig, SsType};
use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut scores = Vec::new();
    let mut reaction = Vec::new();
    let mut method = Vec::new();
    let mut session = Vec::new();

    for (m, (mean, std)) in [("lecture", (70.0, 5.0)), ("seminar", (74.0, 8.0)), ("online", (68.0, 12.0))] {
        let score_dist = Normal::new(mean, std)?;
        let reaction_dist = Normal::new(350.0, 40.0)?;
        for i in 0..20 {
            scores.push(score_dist.sample(&mut rng));
            reaction.push(reaction_dist.sample(&mut rng));
            method.push(m);
            session.push(if i % 2 == 0 { "morning" } else { "evening" });
        }
    }

    let df = df![
        "Test Score (%)" => scores,
        "Reaction Time (ms)" => reaction,
        "Teaching Method" => method,
        "Session" => session,
    ]?;

    println!("=== One-way ANOVA ===");
    let one_way = df.one_way_anova(
        &["Test Score (%)", "Reaction Time (ms)"],
        &["Teaching Method", "Session"],
    )?;
    println!("{one_way}\n");

    println!("=== Two-way ANOVA (type I sums of squares) ===");
    let config = ReportConfig::default().with_ss_type(SsType::Type1);
    let two_way = df.two_way_anova_with(
        &["Test Score (%)"],
        "Teaching Method",
        "Session",
        &config,
    )?;
    println!("{two_way}\n");

    println!("=== Welch's ANOVA (alpha = 0.01) ===");
    let config = ReportConfig::default().with_alpha(0.01)?;
    let welch = df.welch_anova_with(&["Test Score (%)"], &["Teaching Method"], &config)?;
    println!("{welch}");

    Ok(())
}
