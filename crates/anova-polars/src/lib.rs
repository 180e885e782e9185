//! ANOVA reports over Polars DataFrames
//!
//! This crate runs batches of variance analyses over a DataFrame through a
//! single extension trait and returns tidy result tables:
//!
//! - **One-way ANOVA**: every metric against every grouping column
//! - **Two-way ANOVA**: two factors with their interaction, per response
//! - **Welch's ANOVA**: one-way test without the equal-variance assumption
//!
//! Column names are sanitized to ASCII letters before model fitting, so
//! labels such as `"Test Score (%)"` can be passed as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use anova_polars::{AnovaReportExt, ReportConfig};
//!
//! let df = df![
//!     "Score" => [1.0, 2.0, 3.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
//!     "Group" => ["A", "A", "A", "B", "B", "B", "C", "C", "C"],
//! ]?;
//!
//! let report = df.one_way_anova(&["Score"], &["Group"])?;
//! let welch = df.welch_anova_with(&["Score"], &["Group"], &ReportConfig::default().with_alpha(0.01)?)?;
//! ```

mod config;
mod error;
mod formula;
mod methods;
mod report;
mod sanitize;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use formula::{one_way_formula, two_way_formula};
pub use methods::{one_way_anova, two_way_anova, welch_anova};
pub use report::{AnovaRecord, AnovaReport};
pub use sanitize::{factor_label, sanitize_identifier};
pub use traits::*;

// Re-export commonly used types from dependencies
pub use anova_core::{SsType, RESIDUAL_SOURCE};
