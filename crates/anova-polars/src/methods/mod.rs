//! Report operation implementations

mod one_way;
mod two_way;
mod welch;

pub use one_way::one_way_anova;
pub use two_way::two_way_anova;
pub use welch::welch_anova;

use anova_core::AnovaRow;
use polars::prelude::DataFrame;

use crate::{AnovaRecord, AnovaReportExt, ReportConfig, ReportKind, Result};

/// Convert one decomposition row into a report record
pub(crate) fn decomposition_record(
    kind: ReportKind,
    variable: &str,
    factor: Option<String>,
    row: &AnovaRow,
    config: &ReportConfig,
) -> AnovaRecord {
    AnovaRecord {
        variable: variable.to_string(),
        factor,
        source: row.source.clone(),
        sum_sq: Some(row.sum_sq),
        df: row.df,
        df2: None,
        f_value: row.f_value,
        p_value: row.p_value,
        interpretation: kind
            .interpret(row.p_value, config.alpha, row.is_residual())
            .to_string(),
    }
}

impl AnovaReportExt for DataFrame {
    fn one_way_anova_with(
        &self,
        metrics: &[&str],
        group_cols: &[&str],
        config: &ReportConfig,
    ) -> Result<DataFrame> {
        one_way_anova(self, metrics, group_cols, config)?.to_dataframe()
    }

    fn two_way_anova_with(
        &self,
        responses: &[&str],
        factor1: &str,
        factor2: &str,
        config: &ReportConfig,
    ) -> Result<DataFrame> {
        two_way_anova(self, responses, factor1, factor2, config)?.to_dataframe()
    }

    fn welch_anova_with(
        &self,
        metrics: &[&str],
        group_cols: &[&str],
        config: &ReportConfig,
    ) -> Result<DataFrame> {
        welch_anova(self, metrics, group_cols, config)?.to_dataframe()
    }
}
