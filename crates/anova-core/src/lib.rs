//! Formula-driven linear models and variance decomposition
//!
//! This crate fits ordinary least-squares models described by R-style
//! formulas over Polars DataFrames and decomposes their variance:
//!
//! - **Formulas**: `y ~ C(a) + C(b) + C(a):C(b)`, `y ~ C(a)*x`, `y ~ 0 + C(a)`
//! - **OLS**: SVD least squares with treatment-coded categorical factors
//! - **ANOVA tables**: type I (sequential) and type II sums of squares
//! - **Welch's ANOVA**: one-way test robust to unequal group variances
//!
//! # Example
//!
//! ```rust,ignore
//! use anova_core::{anova_lm, ols, welch_anova, SsType};
//! use polars::prelude::*;
//!
//! let df = df![
//!     "score" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//!     "group" => ["a", "a", "b", "b", "c", "c"],
//! ]?;
//!
//! let fit = ols("score ~ C(group)", &df)?.fit()?;
//! let table = anova_lm(&fit, SsType::Type2)?;
//! for row in &table {
//!     println!("{}: F={:.3} p={:.4}", row.source, row.f_value, row.p_value);
//! }
//!
//! let welch = welch_anova(&df, "score", "group")?;
//! println!("Welch F={:.3} on ({}, {:.2}) df", welch.f_value, welch.ddof1, welch.ddof2);
//! ```

mod anova;
mod design;
mod error;
mod formula;
mod frame;
mod ols;
mod welch;

pub use anova::{anova_lm, AnovaRow, AnovaTable, SsType, RESIDUAL_SOURCE};
pub use design::DesignMatrix;
pub use error::{Error, Result};
pub use formula::{Factor, Formula, Term};
pub use frame::{ModelFrame, Variable};
pub use ols::{ols, OlsFit, OlsModel};
pub use welch::{welch_anova, WelchAnova};
