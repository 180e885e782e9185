//! Welch's one-way ANOVA for groups with unequal variances

use anofox_tests::{one_way_anova as lib_one_way_anova, AnovaKind};
use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use crate::{Error, Formula, ModelFrame, Result, Variable};

/// Result of Welch's ANOVA
#[derive(Debug, Clone, PartialEq)]
pub struct WelchAnova {
    /// Name of the between-groups column
    pub source: String,
    /// Numerator degrees of freedom (groups - 1)
    pub ddof1: f64,
    /// Welch-adjusted denominator degrees of freedom
    pub ddof2: f64,
    pub f_value: f64,
    /// Uncorrected p-value
    pub p_unc: f64,
    /// Partial eta-squared (unweighted between / total sum of squares)
    pub np2: f64,
}

impl WelchAnova {
    /// Whether the Welch statistic could be computed
    pub fn is_defined(&self) -> bool {
        !self.f_value.is_nan()
    }
}

/// Welch's ANOVA of `dv` across the groups of `between`
///
/// Rows with a missing value in either column are dropped. Group levels are
/// taken from the string form of `between`. A group with fewer than two
/// observations or zero variance leaves the statistic undefined: `ddof2`,
/// `f_value` and `p_unc` are NaN.
#[instrument(level = "debug", skip(data))]
pub fn welch_anova(data: &DataFrame, dv: &str, between: &str) -> Result<WelchAnova> {
    let formula = Formula::parse(&format!("{dv} ~ C({between})"))?;
    let frame = ModelFrame::from_dataframe(&formula, data)?;

    let (codes, levels) = match frame.variable(between) {
        Some(Variable::Categorical { codes, levels }) => (codes, levels),
        _ => return Err(Error::UnknownColumn(between.to_string())),
    };

    if levels.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: levels.len(),
        });
    }

    let mut grouped: Vec<Vec<f64>> = vec![Vec::new(); levels.len()];
    for (&code, &value) in codes.iter().zip(frame.response()) {
        grouped[code].push(value);
    }

    let ddof1 = (levels.len() - 1) as f64;
    let np2 = eta_squared(&grouped);

    if let Some((values, level)) = grouped.iter().zip(levels).find(|(v, _)| is_degenerate(v)) {
        debug!(
            "Welch ANOVA {} by {} undefined: group '{}' has {} observations with zero spread",
            dv,
            between,
            level,
            values.len()
        );
        return Ok(WelchAnova {
            source: between.to_string(),
            ddof1,
            ddof2: f64::NAN,
            f_value: f64::NAN,
            p_unc: f64::NAN,
            np2,
        });
    }

    let refs: Vec<&[f64]> = grouped.iter().map(Vec::as_slice).collect();
    let result = lib_one_way_anova(&refs, AnovaKind::Welch)
        .map_err(|e| Error::Computation(format!("Welch's ANOVA: {e}")))?;

    debug!(
        "Welch ANOVA {} by {}: F={:.4}, ddof2={:.3}, p={:.4e}",
        dv, between, result.statistic, result.df_within, result.p_value
    );

    Ok(WelchAnova {
        source: between.to_string(),
        ddof1,
        ddof2: result.df_within as f64,
        f_value: result.statistic,
        p_unc: result.p_value,
        np2,
    })
}

/// Fewer than two observations, or no spread
fn is_degenerate(values: &[f64]) -> bool {
    values.len() < 2 || values.iter().all(|&v| v == values[0])
}

/// Unweighted between-group share of the total sum of squares
fn eta_squared(groups: &[Vec<f64>]) -> f64 {
    let n_total: usize = groups.iter().map(Vec::len).sum();
    let grand_mean = groups.iter().flatten().sum::<f64>() / n_total as f64;

    let ss_between: f64 = groups
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| {
            let mean = g.iter().sum::<f64>() / g.len() as f64;
            g.len() as f64 * (mean - grand_mean).powi(2)
        })
        .sum();
    let ss_total: f64 = groups
        .iter()
        .flatten()
        .map(|v| (v - grand_mean).powi(2))
        .sum();

    ss_between / ss_total
}
