//! DataFrame extension trait for ANOVA reports

use polars::prelude::*;

use crate::{ReportConfig, Result};

/// ANOVA report operations on Polars DataFrames
///
/// Every operation leaves `self` unchanged and returns a freshly built
/// report frame. Column names may contain any characters; they are matched
/// after stripping everything but ASCII letters, and the `Variable` column
/// echoes the name as given.
pub trait AnovaReportExt {
    /// One-way ANOVA per (grouping column, metric) pair
    ///
    /// # Arguments
    /// * `metrics` - Numeric response columns
    /// * `group_cols` - Categorical grouping columns
    ///
    /// # Returns
    /// DataFrame with columns
    /// `Variable, Factor, Source, Sum Sq, df, F-Value, p-Value, Interpretation`
    fn one_way_anova(&self, metrics: &[&str], group_cols: &[&str]) -> Result<DataFrame> {
        self.one_way_anova_with(metrics, group_cols, &ReportConfig::default())
    }

    /// One-way ANOVA with an explicit configuration
    fn one_way_anova_with(
        &self,
        metrics: &[&str],
        group_cols: &[&str],
        config: &ReportConfig,
    ) -> Result<DataFrame>;

    /// Two-way ANOVA with interaction per response column
    ///
    /// # Arguments
    /// * `responses` - Numeric response columns
    /// * `factor1`, `factor2` - Categorical factor columns
    ///
    /// # Returns
    /// DataFrame with columns
    /// `Variable, Source, Sum Sq, df, F-Value, p-Value, Interpretation`
    fn two_way_anova(&self, responses: &[&str], factor1: &str, factor2: &str) -> Result<DataFrame> {
        self.two_way_anova_with(responses, factor1, factor2, &ReportConfig::default())
    }

    /// Two-way ANOVA with an explicit configuration
    fn two_way_anova_with(
        &self,
        responses: &[&str],
        factor1: &str,
        factor2: &str,
        config: &ReportConfig,
    ) -> Result<DataFrame>;

    /// Welch's ANOVA per (grouping column, metric) pair
    ///
    /// # Returns
    /// DataFrame with columns
    /// `Variable, Grouping Factor, Source, df, df2, F-Value, p-Value, Interpretation`
    fn welch_anova(&self, metrics: &[&str], group_cols: &[&str]) -> Result<DataFrame> {
        self.welch_anova_with(metrics, group_cols, &ReportConfig::default())
    }

    /// Welch's ANOVA with an explicit configuration
    fn welch_anova_with(
        &self,
        metrics: &[&str],
        group_cols: &[&str],
        config: &ReportConfig,
    ) -> Result<DataFrame>;
}
