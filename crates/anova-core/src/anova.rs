//! ANOVA tables for fitted linear models
//!
//! Sums of squares are computed by comparing nested least-squares fits that
//! use column subsets of the full design matrix. The F statistic of every
//! term uses the residual mean square of the full model.

use std::fmt;

use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::{debug, instrument};

use crate::ols::least_squares;
use crate::{Error, OlsFit, Result};

/// Source label of the residual row
pub const RESIDUAL_SOURCE: &str = "Residual";

/// Sum-of-squares convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SsType {
    /// Sequential sums of squares in formula order
    Type1,
    /// Each term after every term that does not contain it
    #[default]
    Type2,
}

impl SsType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Type1 => "type I",
            Self::Type2 => "type II",
        }
    }
}

impl fmt::Display for SsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of an ANOVA table
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaRow {
    /// Term label (`C(a)`, `C(a):C(b)`) or [`RESIDUAL_SOURCE`]
    pub source: String,
    pub sum_sq: f64,
    pub df: f64,
    /// NaN on the residual row
    pub f_value: f64,
    /// `P(F > f_value)`; NaN on the residual row
    pub p_value: f64,
}

impl AnovaRow {
    pub fn is_residual(&self) -> bool {
        self.source == RESIDUAL_SOURCE
    }
}

/// ANOVA decomposition: one row per model term followed by the residual row
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaTable {
    pub ss_type: SsType,
    pub rows: Vec<AnovaRow>,
}

impl AnovaTable {
    pub fn iter(&self) -> std::slice::Iter<'_, AnovaRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a source label
    pub fn get(&self, source: &str) -> Option<&AnovaRow> {
        self.rows.iter().find(|r| r.source == source)
    }

    pub fn residual(&self) -> Option<&AnovaRow> {
        self.get(RESIDUAL_SOURCE)
    }
}

impl<'a> IntoIterator for &'a AnovaTable {
    type Item = &'a AnovaRow;
    type IntoIter = std::slice::Iter<'a, AnovaRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// ANOVA table for a fitted linear model
///
/// # Arguments
/// * `fit` - Fitted OLS model
/// * `typ` - Sum-of-squares convention
///
/// # Returns
/// One row per formula term, in formula order, then the residual row
#[instrument(level = "debug", skip(fit), fields(formula = %fit.model().formula()))]
pub fn anova_lm(fit: &OlsFit, typ: SsType) -> Result<AnovaTable> {
    let model = fit.model();
    let terms = &model.formula().terms;
    let design = model.design();
    let y = fit.response();

    let df_resid = fit.df_resid() as f64;
    let scale = fit.scale();

    let mut rows = Vec::with_capacity(terms.len() + 1);
    for (index, term) in terms.iter().enumerate() {
        let reduced_terms: Vec<usize> = match typ {
            SsType::Type1 => (0..index).collect(),
            SsType::Type2 => (0..terms.len())
                .filter(|&other| other != index && !terms[other].contains(term))
                .collect(),
        };

        let reduced_columns = design.columns_for_terms(reduced_terms.iter().copied());
        let full_columns =
            design.columns_for_terms(reduced_terms.iter().copied().chain([index]));

        let reduced = least_squares(&design.select(&reduced_columns), y)?;
        let full = least_squares(&design.select(&full_columns), y)?;

        let df = full.rank.saturating_sub(reduced.rank) as f64;
        let sum_sq = (reduced.rss - full.rss).max(0.0);
        let (f_value, p_value) = if df > 0.0 {
            let f_value = (sum_sq / df) / scale;
            (f_value, f_survival(f_value, df, df_resid)?)
        } else {
            (f64::NAN, f64::NAN)
        };

        debug!(
            "{} {}: ss={:.6}, df={}, F={:.4}, p={:.4e}",
            typ, term, sum_sq, df, f_value, p_value
        );

        rows.push(AnovaRow {
            source: term.label(),
            sum_sq,
            df,
            f_value,
            p_value,
        });
    }

    rows.push(AnovaRow {
        source: RESIDUAL_SOURCE.to_string(),
        sum_sq: fit.ssr(),
        df: df_resid,
        f_value: f64::NAN,
        p_value: f64::NAN,
    });

    Ok(AnovaTable { ss_type: typ, rows })
}

/// Upper tail of the F distribution
///
/// NaN when the statistic or either degree of freedom is unusable.
pub(crate) fn f_survival(f_value: f64, df1: f64, df2: f64) -> Result<f64> {
    if f_value.is_nan() || !(df1 > 0.0) || !(df2 > 0.0) || !df2.is_finite() {
        return Ok(f64::NAN);
    }
    if f_value == f64::INFINITY {
        return Ok(0.0);
    }
    let dist = FisherSnedecor::new(df1, df2)
        .map_err(|e| Error::Computation(format!("F distribution: {e}")))?;
    Ok(dist.sf(f_value.max(0.0)).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ols;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn one_way_df() -> DataFrame {
        df![
            "y" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            "g" => ["a", "a", "a", "b", "b", "b", "c", "c", "c"],
        ]
        .unwrap()
    }

    #[test]
    fn test_one_way_matches_classical_decomposition() {
        let fit = ols("y ~ C(g)", &one_way_df()).unwrap().fit().unwrap();
        let table = anova_lm(&fit, SsType::Type2).unwrap();

        assert_eq!(table.len(), 2);
        let term = table.get("C(g)").unwrap();
        // group means 2, 5, 8 around grand mean 5
        assert_relative_eq!(term.sum_sq, 54.0, epsilon = 1e-9);
        assert_relative_eq!(term.df, 2.0);
        assert_relative_eq!(term.f_value, 27.0, epsilon = 1e-9);
        assert!(term.p_value < 0.01);

        let residual = table.residual().unwrap();
        assert!(residual.is_residual());
        assert_relative_eq!(residual.sum_sq, 6.0, epsilon = 1e-9);
        assert_relative_eq!(residual.df, 6.0);
        assert!(residual.f_value.is_nan());
        assert!(residual.p_value.is_nan());
    }

    #[test]
    fn test_type1_equals_type2_for_single_factor() {
        let fit = ols("y ~ C(g)", &one_way_df()).unwrap().fit().unwrap();
        let t1 = anova_lm(&fit, SsType::Type1).unwrap();
        let t2 = anova_lm(&fit, SsType::Type2).unwrap();
        assert_relative_eq!(t1.rows[0].sum_sq, t2.rows[0].sum_sq, epsilon = 1e-9);
        assert_eq!(t1.ss_type, SsType::Type1);
    }

    #[test]
    fn test_unbalanced_two_way_type1_differs_from_type2() {
        let df = df![
            "y" => [4.0, 5.0, 6.0, 9.0, 3.0, 8.0, 10.0, 12.0, 11.0, 7.0],
            "a" => ["p", "p", "p", "p", "q", "q", "q", "q", "q", "q"],
            "b" => ["u", "u", "u", "v", "u", "v", "v", "v", "v", "u"],
        ]
        .unwrap();
        let fit = ols("y ~ C(a) + C(b)", &df).unwrap().fit().unwrap();
        let t1 = anova_lm(&fit, SsType::Type1).unwrap();
        let t2 = anova_lm(&fit, SsType::Type2).unwrap();

        // Last term is identical under both conventions
        assert_relative_eq!(t1.rows[1].sum_sq, t2.rows[1].sum_sq, epsilon = 1e-9);
        assert_relative_eq!(t1.rows[0].sum_sq, 15.0, epsilon = 1e-9);
        assert_relative_eq!(t2.rows[0].sum_sq, 0.5, epsilon = 1e-9);
        assert_relative_eq!(t2.rows[1].sum_sq, 48.0, epsilon = 1e-9);
    }

    #[test]
    fn test_f_survival_edges() {
        assert!(f_survival(f64::NAN, 1.0, 1.0).unwrap().is_nan());
        assert!(f_survival(1.0, 0.0, 1.0).unwrap().is_nan());
        assert_eq!(f_survival(f64::INFINITY, 2.0, 10.0).unwrap(), 0.0);
        assert_relative_eq!(f_survival(0.0, 2.0, 10.0).unwrap(), 1.0);
        // F(1, 10) critical value at 0.05 is about 4.965
        assert_relative_eq!(f_survival(4.9646, 1.0, 10.0).unwrap(), 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_f_survival_keeps_tiny_tail() {
        // with d1 = 2 the upper tail is (1 + 2F/d2)^(-d2/2)
        let p = f_survival(1000.0, 2.0, 27.0).unwrap();
        let expected = (1.0 + 2.0 * 1000.0 / 27.0_f64).powf(-13.5);
        assert!(p > 0.0 && p < 1e-20);
        assert_relative_eq!(p, expected, max_relative = 1e-6);
    }
}
