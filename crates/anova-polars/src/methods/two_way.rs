//! Two-way ANOVA report with interaction

use anova_core::{anova_lm, ols};
use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use super::decomposition_record;
use crate::sanitize::sanitize_columns;
use crate::{sanitize_identifier, two_way_formula, AnovaReport, ReportConfig, ReportKind, Result};

/// Two-way ANOVA with interaction for every response column
///
/// Fits `response ~ C(f1) + C(f2) + C(f1):C(f2)`. Records carry no factor
/// label; the `Source` column names the term.
#[instrument(level = "debug", skip(data, responses, config), fields(n_responses = responses.len()))]
pub fn two_way_anova(
    data: &DataFrame,
    responses: &[&str],
    factor1: &str,
    factor2: &str,
    config: &ReportConfig,
) -> Result<AnovaReport> {
    config.validate()?;
    let kind = ReportKind::TwoWay;
    let referenced: Vec<&str> = responses.iter().copied().chain([factor1, factor2]).collect();
    let data = sanitize_columns(data, &referenced)?;
    let factor1 = sanitize_identifier(factor1);
    let factor2 = sanitize_identifier(factor2);

    let mut report = AnovaReport::new(kind);
    for &response in responses {
        let formula = two_way_formula(&sanitize_identifier(response), &factor1, &factor2);
        debug!("Fitting {}", formula);

        let fit = ols(&formula, &data)?.fit()?;
        let table = anova_lm(&fit, config.ss_type)?;
        for row in &table {
            report
                .records
                .push(decomposition_record(kind, response, None, row, config));
        }
    }

    debug!("{} report: {} records", kind.name(), report.len());
    Ok(report)
}
