//! Welch's ANOVA report

use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use crate::sanitize::sanitize_columns;
use crate::{
    factor_label, sanitize_identifier, AnovaRecord, AnovaReport, ReportConfig, ReportKind, Result,
};

/// Welch's ANOVA for every (grouping column, metric) pair
///
/// Each pair yields exactly one record; there is no residual row.
#[instrument(
    level = "debug",
    skip_all,
    fields(n_metrics = metrics.len(), n_groups = group_cols.len())
)]
pub fn welch_anova(
    data: &DataFrame,
    metrics: &[&str],
    group_cols: &[&str],
    config: &ReportConfig,
) -> Result<AnovaReport> {
    config.validate()?;
    let kind = ReportKind::Welch;
    let referenced: Vec<&str> = metrics.iter().chain(group_cols).copied().collect();
    let data = sanitize_columns(data, &referenced)?;
    let groups: Vec<String> = group_cols.iter().map(|g| sanitize_identifier(g)).collect();

    let mut report = AnovaReport::new(kind);
    for group in &groups {
        for &metric in metrics {
            let response = sanitize_identifier(metric);
            debug!("Welch's ANOVA of {} by {}", response, group);

            let result = anova_core::welch_anova(&data, &response, group)?;
            report.records.push(AnovaRecord {
                variable: metric.to_string(),
                factor: Some(factor_label(group)),
                source: result.source,
                sum_sq: None,
                df: result.ddof1,
                df2: Some(result.ddof2),
                f_value: result.f_value,
                p_value: result.p_unc,
                interpretation: kind.interpret(result.p_unc, config.alpha, false).to_string(),
            });
        }
    }

    debug!("{} report: {} records", kind.name(), report.len());
    Ok(report)
}
