//! One-way, two-way and Welch's ANOVA reports over Polars DataFrames
//!
//! The workspace is split into two crates, re-exported here:
//!
//! - [`model`] (`anova-core`): formula parsing, OLS fitting, type I/II
//!   ANOVA tables and Welch's ANOVA
//! - [`report`] (`anova-polars`): the [`AnovaReportExt`] DataFrame trait
//!   producing tidy report tables
//!
//! # Example
//!
//! ```rust,ignore
//! use anova_stats::AnovaReportExt;
//! use polars::prelude::*;
//!
//! let df = df![
//!     "Score" => [4.0, 5.0, 6.0, 8.0, 9.0, 10.0],
//!     "Group" => ["a", "a", "a", "b", "b", "b"],
//! ]?;
//! println!("{}", df.one_way_anova(&["Score"], &["Group"])?);
//! ```

pub use anova_core as model;
pub use anova_polars as report;

pub use anova_polars::{
    AnovaRecord, AnovaReport, AnovaReportExt, Error, ReportConfig, ReportKind, Result, SsType,
};
