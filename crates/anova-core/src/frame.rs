//! Model frame extraction from Polars DataFrames
//!
//! A model frame is the complete-case subset of the columns a formula
//! references: the response as `f64`, numeric covariates as `f64`, and
//! categorical variables as level codes.

use std::cmp::Ordering;
use std::collections::HashMap;

use polars::prelude::*;
use tracing::debug;

use crate::{Error, Formula, Result};

/// A predictor column after listwise deletion
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    /// Numeric covariate
    Numeric(Vec<f64>),
    /// Categorical factor; `codes[i]` indexes into `levels`
    Categorical { codes: Vec<usize>, levels: Vec<String> },
}

impl Variable {
    /// Levels of a categorical variable; empty for numeric ones
    pub fn levels(&self) -> &[String] {
        match self {
            Variable::Numeric(_) => &[],
            Variable::Categorical { levels, .. } => levels,
        }
    }
}

/// Complete-case data for one formula
#[derive(Debug, Clone)]
pub struct ModelFrame {
    response: Vec<f64>,
    variables: HashMap<String, Variable>,
    n_dropped: usize,
}

enum RawColumn {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl RawColumn {
    fn is_missing(&self, row: usize) -> bool {
        match self {
            RawColumn::Numeric(values) => values[row].map_or(true, f64::is_nan),
            RawColumn::Text(values) => values[row].is_none(),
        }
    }
}

impl ModelFrame {
    /// Extract the variables `formula` references from `data`.
    ///
    /// Rows with a null or NaN in any referenced column are dropped.
    pub fn from_dataframe(formula: &Formula, data: &DataFrame) -> Result<Self> {
        let response_values = numeric_values(data, &formula.response)?;

        let mut raw_predictors = Vec::new();
        for factor in formula.predictors() {
            let raw = if factor.categorical {
                RawColumn::Text(text_values(data, &factor.name)?)
            } else {
                RawColumn::Numeric(numeric_values(data, &factor.name)?)
            };
            raw_predictors.push((factor.name.clone(), raw));
        }

        let height = data.height();
        let keep: Vec<usize> = (0..height)
            .filter(|&row| {
                response_values[row].map_or(false, |v| !v.is_nan())
                    && raw_predictors.iter().all(|(_, raw)| !raw.is_missing(row))
            })
            .collect();

        if keep.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }

        let response = keep.iter().filter_map(|&i| response_values[i]).collect();

        let mut variables = HashMap::with_capacity(raw_predictors.len());
        for (name, raw) in raw_predictors {
            let variable = match raw {
                RawColumn::Numeric(values) => {
                    Variable::Numeric(keep.iter().filter_map(|&i| values[i]).collect())
                }
                RawColumn::Text(values) => {
                    let kept: Vec<&str> = keep
                        .iter()
                        .filter_map(|&i| values[i].as_deref())
                        .collect();
                    encode_levels(&kept)
                }
            };
            variables.insert(name, variable);
        }

        let frame = Self {
            response,
            variables,
            n_dropped: height - keep.len(),
        };
        frame.check_finite()?;

        debug!(
            "Model frame for '{}': {} rows kept, {} dropped",
            formula,
            frame.n_obs(),
            frame.n_dropped
        );
        Ok(frame)
    }

    /// Number of complete observations
    pub fn n_obs(&self) -> usize {
        self.response.len()
    }

    /// Number of rows removed by listwise deletion
    pub fn n_dropped(&self) -> usize {
        self.n_dropped
    }

    /// Response values
    pub fn response(&self) -> &[f64] {
        &self.response
    }

    /// Look up a predictor by column name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    fn check_finite(&self) -> Result<()> {
        if self.response.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("response"));
        }
        for (name, variable) in &self.variables {
            if let Variable::Numeric(values) = variable {
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(Error::non_finite(name));
                }
            }
        }
        Ok(())
    }
}

fn lookup<'a>(data: &'a DataFrame, name: &str) -> Result<&'a Column> {
    data.column(name)
        .map_err(|_| Error::UnknownColumn(name.to_string()))
}

fn numeric_values(data: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = lookup(data, name)?;
    let dtype = column.dtype();
    if !(dtype.is_primitive_numeric() || dtype.is_bool()) {
        return Err(Error::type_mismatch(name, "numeric", dtype));
    }
    let float_column = column.cast(&DataType::Float64)?;
    Ok(float_column.f64()?.iter().collect())
}

fn text_values(data: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = lookup(data, name)?;
    let text_column = column.cast(&DataType::String)?;
    Ok(text_column
        .str()?
        .iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Sorted unique levels; numeric-looking labels sort by value
fn encode_levels(values: &[&str]) -> Variable {
    let mut levels: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    levels.sort();
    levels.dedup();
    let all_numeric = levels.iter().all(|l| l.parse::<f64>().is_ok());
    if all_numeric {
        levels.sort_by(|a, b| {
            let (x, y) = (a.parse::<f64>().unwrap_or(0.0), b.parse::<f64>().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        });
    }

    let index: HashMap<&str, usize> = levels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();
    let codes = values.iter().map(|v| index[v]).collect();

    Variable::Categorical { codes, levels }
}
