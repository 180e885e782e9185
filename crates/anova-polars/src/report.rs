//! Report records and their DataFrame form

use polars::prelude::*;
use serde::Serialize;

use crate::{ReportKind, Result};

/// One row of an ANOVA report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaRecord {
    /// Original (unsanitized) name of the response column
    pub variable: String,
    /// Title-cased grouping factor; `None` in two-way reports
    pub factor: Option<String>,
    /// Decomposition source: term label or `Residual`
    pub source: String,
    /// Sum of squares; `None` in Welch reports
    pub sum_sq: Option<f64>,
    pub df: f64,
    /// Welch-adjusted denominator degrees of freedom; Welch reports only
    pub df2: Option<f64>,
    pub f_value: f64,
    pub p_value: f64,
    pub interpretation: String,
}

/// Ordered result table of one report operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaReport {
    pub kind: ReportKind,
    pub records: Vec<AnovaRecord>,
}

impl AnovaReport {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnovaRecord> {
        self.records.iter()
    }

    /// Records whose variable is `variable`, in report order
    pub fn for_variable<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a AnovaRecord> {
        self.records.iter().filter(move |r| r.variable == variable)
    }

    /// Render the report with the column layout of its kind
    ///
    /// - one-way: `Variable, Factor, Source, Sum Sq, df, F-Value, p-Value, Interpretation`
    /// - two-way: `Variable, Source, Sum Sq, df, F-Value, p-Value, Interpretation`
    /// - Welch: `Variable, Grouping Factor, Source, df, df2, F-Value, p-Value, Interpretation`
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(9);
        columns.push(text_column("Variable", self.records.iter().map(|r| r.variable.clone())));

        if let Some(header) = self.kind.factor_column() {
            columns.push(text_column(
                header,
                self.records
                    .iter()
                    .map(|r| r.factor.clone().unwrap_or_default()),
            ));
        }

        columns.push(text_column("Source", self.records.iter().map(|r| r.source.clone())));

        if self.kind != ReportKind::Welch {
            columns.push(float_column(
                "Sum Sq",
                self.records.iter().map(|r| r.sum_sq.unwrap_or(f64::NAN)),
            ));
        }

        columns.push(float_column("df", self.records.iter().map(|r| r.df)));

        if self.kind == ReportKind::Welch {
            columns.push(float_column(
                "df2",
                self.records.iter().map(|r| r.df2.unwrap_or(f64::NAN)),
            ));
        }

        columns.push(float_column("F-Value", self.records.iter().map(|r| r.f_value)));
        columns.push(float_column("p-Value", self.records.iter().map(|r| r.p_value)));
        columns.push(text_column(
            "Interpretation",
            self.records.iter().map(|r| r.interpretation.clone()),
        ));

        Ok(DataFrame::new(columns)?)
    }
}

impl<'a> IntoIterator for &'a AnovaReport {
    type Item = &'a AnovaRecord;
    type IntoIter = std::slice::Iter<'a, AnovaRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn text_column(name: &str, values: impl Iterator<Item = String>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into()
}

fn float_column(name: &str, values: impl Iterator<Item = f64>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str) -> AnovaRecord {
        AnovaRecord {
            variable: "Score".to_string(),
            factor: Some("Group".to_string()),
            source: source.to_string(),
            sum_sq: Some(1.0),
            df: 2.0,
            df2: None,
            f_value: 3.0,
            p_value: 0.04,
            interpretation: "Significant".to_string(),
        }
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_one_way_layout() {
        let mut report = AnovaReport::new(ReportKind::OneWay);
        report.records.push(record("C(Group)"));
        report.records.push(record("Residual"));

        let df = report.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 8));
        assert_eq!(
            names(&df),
            vec!["Variable", "Factor", "Source", "Sum Sq", "df", "F-Value", "p-Value", "Interpretation"]
        );
    }

    #[test]
    fn test_two_way_layout_has_no_factor_column() {
        let mut report = AnovaReport::new(ReportKind::TwoWay);
        report.records.push(record("C(a)"));

        let df = report.to_dataframe().unwrap();
        assert_eq!(
            names(&df),
            vec!["Variable", "Source", "Sum Sq", "df", "F-Value", "p-Value", "Interpretation"]
        );
    }

    #[test]
    fn test_welch_layout() {
        let mut report = AnovaReport::new(ReportKind::Welch);
        report.records.push(AnovaRecord {
            sum_sq: None,
            df2: Some(7.5),
            ..record("Group")
        });

        let df = report.to_dataframe().unwrap();
        assert_eq!(
            names(&df),
            vec!["Variable", "Grouping Factor", "Source", "df", "df2", "F-Value", "p-Value", "Interpretation"]
        );
        assert_eq!(df.column("df2").unwrap().f64().unwrap().get(0), Some(7.5));
    }

    #[test]
    fn test_for_variable_filters_in_order() {
        let mut report = AnovaReport::new(ReportKind::OneWay);
        report.records.push(record("C(Group)"));
        report.records.push(AnovaRecord {
            variable: "Time".to_string(),
            ..record("C(Group)")
        });
        report.records.push(record("Residual"));

        let sources: Vec<&str> = report
            .for_variable("Score")
            .map(|r| r.source.as_str())
            .collect();
        assert_eq!(sources, vec!["C(Group)", "Residual"]);
        assert_eq!(report.for_variable("Time").count(), 1);
        assert_eq!(report.for_variable("Missing").count(), 0);
    }

    #[test]
    fn test_empty_report_renders_empty_frame() {
        let report = AnovaReport::new(ReportKind::TwoWay);
        assert!(report.is_empty());
        let df = report.to_dataframe().unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 7);
    }

    #[test]
    fn test_records_serialize() {
        let json = serde_json::to_string(&record("C(Group)")).unwrap();
        assert!(json.contains("\"variable\":\"Score\""));
        assert!(json.contains("\"interpretation\":\"Significant\""));
    }
}
