//! Configuration types for ANOVA reports

use anova_core::SsType;
use serde::Serialize;

use crate::{Error, Result};

/// Significance threshold applied when no other is configured
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Interpretation given to residual rows
pub const NOT_APPLICABLE: &str = "-";

/// Which report a table was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    /// `metric ~ C(group)` per (group, metric) pair
    OneWay,
    /// `metric ~ C(f1) + C(f2) + C(f1):C(f2)` per metric
    TwoWay,
    /// Welch's F-test per (group, metric) pair
    Welch,
}

impl ReportKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OneWay => "one_way",
            Self::TwoWay => "two_way",
            Self::Welch => "welch",
        }
    }

    /// Interpretation for p-values below alpha
    pub fn significant_label(&self) -> &'static str {
        match self {
            Self::OneWay => "Significant",
            Self::TwoWay | Self::Welch => "Significant difference",
        }
    }

    /// Interpretation for p-values at or above alpha
    pub fn not_significant_label(&self) -> &'static str {
        match self {
            Self::OneWay => "No significant",
            Self::TwoWay | Self::Welch => "No significant difference",
        }
    }

    /// Header of the per-row factor column, if the report has one
    pub fn factor_column(&self) -> Option<&'static str> {
        match self {
            Self::OneWay => Some("Factor"),
            Self::TwoWay => None,
            Self::Welch => Some("Grouping Factor"),
        }
    }

    /// Map a p-value to this report's interpretation string
    ///
    /// NaN p-values are never significant.
    pub fn interpret(&self, p_value: f64, alpha: f64, residual: bool) -> &'static str {
        if residual {
            NOT_APPLICABLE
        } else if p_value < alpha {
            self.significant_label()
        } else {
            self.not_significant_label()
        }
    }
}

/// Settings shared by every report operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Significance threshold, in (0, 1)
    pub alpha: f64,
    /// Sum-of-squares convention for the one- and two-way reports
    pub ss_type: SsType,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            ss_type: SsType::Type2,
        }
    }
}

impl ReportConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        self.alpha = alpha;
        self.validate()?;
        Ok(self)
    }

    pub fn with_ss_type(mut self, ss_type: SsType) -> Self {
        self.ss_type = ss_type;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "alpha {} must be in (0, 1)",
                self.alpha
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpretation_threshold() {
        let kind = ReportKind::OneWay;
        assert_eq!(kind.interpret(0.01, 0.05, false), "Significant");
        assert_eq!(kind.interpret(0.05, 0.05, false), "No significant");
        assert_eq!(kind.interpret(0.5, 0.05, false), "No significant");
        assert_eq!(kind.interpret(f64::NAN, 0.05, false), "No significant");
        assert_eq!(kind.interpret(f64::NAN, 0.05, true), NOT_APPLICABLE);

        let kind = ReportKind::Welch;
        assert_eq!(kind.interpret(0.049, 0.05, false), "Significant difference");
        assert_eq!(kind.interpret(0.051, 0.05, false), "No significant difference");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ReportKind::OneWay.name(), "one_way");
        assert_eq!(ReportKind::TwoWay.name(), "two_way");
        assert_eq!(ReportKind::Welch.name(), "welch");
    }

    #[test]
    fn test_factor_columns() {
        assert_eq!(ReportKind::OneWay.factor_column(), Some("Factor"));
        assert_eq!(ReportKind::TwoWay.factor_column(), None);
        assert_eq!(ReportKind::Welch.factor_column(), Some("Grouping Factor"));
    }

    #[test]
    fn test_config_validation() {
        let config = ReportConfig::default();
        assert_eq!(config.alpha, DEFAULT_ALPHA);
        assert_eq!(config.ss_type, SsType::Type2);

        assert!(ReportConfig::default().with_alpha(0.01).is_ok());
        assert!(ReportConfig::default().with_alpha(0.0).is_err());
        assert!(ReportConfig::default().with_alpha(1.0).is_err());
        assert!(ReportConfig::default().with_alpha(f64::NAN).is_err());

        let config = ReportConfig::default().with_ss_type(SsType::Type1);
        assert_eq!(config.ss_type, SsType::Type1);
    }
}
