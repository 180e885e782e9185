//! One-way ANOVA report

use anova_core::{anova_lm, ols};
use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use super::decomposition_record;
use crate::sanitize::sanitize_columns;
use crate::{
    factor_label, one_way_formula, sanitize_identifier, AnovaReport, ReportConfig, ReportKind,
    Result,
};

/// One-way ANOVA for every (grouping column, metric) pair
///
/// Fits `metric ~ C(group)` on sanitized column names and emits the type II
/// (by default) decomposition rows, grouping columns in the outer loop and
/// metrics in the inner loop.
///
/// # Arguments
/// * `data` - Dataset; not modified
/// * `metrics` - Numeric response columns
/// * `group_cols` - Categorical grouping columns
/// * `config` - Significance threshold and sum-of-squares type
#[instrument(
    level = "debug",
    skip_all,
    fields(n_metrics = metrics.len(), n_groups = group_cols.len())
)]
pub fn one_way_anova(
    data: &DataFrame,
    metrics: &[&str],
    group_cols: &[&str],
    config: &ReportConfig,
) -> Result<AnovaReport> {
    config.validate()?;
    let kind = ReportKind::OneWay;
    let referenced: Vec<&str> = metrics.iter().chain(group_cols).copied().collect();
    let data = sanitize_columns(data, &referenced)?;
    let groups: Vec<String> = group_cols.iter().map(|g| sanitize_identifier(g)).collect();

    let mut report = AnovaReport::new(kind);
    for group in &groups {
        for &metric in metrics {
            let formula = one_way_formula(&sanitize_identifier(metric), group);
            debug!("Fitting {}", formula);

            let fit = ols(&formula, &data)?.fit()?;
            let table = anova_lm(&fit, config.ss_type)?;
            for row in &table {
                report.records.push(decomposition_record(
                    kind,
                    metric,
                    Some(factor_label(group)),
                    row,
                    config,
                ));
            }
        }
    }

    debug!("{} report: {} records", kind.name(), report.len());
    Ok(report)
}
