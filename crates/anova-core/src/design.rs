//! Design matrix construction with treatment coding
//!
//! Categorical factors are dummy coded against their first level. Inside an
//! interaction, a categorical factor is contrast coded when it also appears
//! as a main effect and fully coded otherwise, so the interaction columns
//! span only what the lower-order terms do not.

use std::ops::Range;

use nalgebra::DMatrix;

use crate::{Error, Factor, Formula, ModelFrame, Result, Variable};

/// Design matrix plus the mapping from model terms to column blocks
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    matrix: DMatrix<f64>,
    column_names: Vec<String>,
    intercept: Option<usize>,
    term_columns: Vec<Range<usize>>,
}

/// One factor's contribution to a term: named columns of length n
struct Block {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DesignMatrix {
    /// Build the design matrix for `formula` over `frame`
    pub fn build(formula: &Formula, frame: &ModelFrame) -> Result<Self> {
        let n = frame.n_obs();
        let mut names: Vec<String> = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();

        let intercept = if formula.has_intercept {
            names.push("Intercept".to_string());
            columns.push(vec![1.0; n]);
            Some(0)
        } else {
            None
        };

        let mut full_rank_main_used = formula.has_intercept;
        let mut term_columns = Vec::with_capacity(formula.terms.len());

        for term in &formula.terms {
            let start = columns.len();
            let mut product = Block {
                names: vec![String::new()],
                columns: vec![vec![1.0; n]],
            };

            for factor in &term.factors {
                let full = if term.degree() == 1 {
                    // Without an intercept the first categorical main effect
                    // absorbs the constant
                    factor.categorical && !std::mem::replace(&mut full_rank_main_used, true)
                } else {
                    !formula.has_main_effect(&factor.name)
                };
                let block = factor_block(factor, frame, full)?;
                product = cross(product, block);
            }

            names.extend(product.names);
            columns.extend(product.columns);
            term_columns.push(start..columns.len());
        }

        if columns.is_empty() {
            return Err(Error::formula(&formula.source, "model has no columns"));
        }

        let matrix = DMatrix::from_fn(n, columns.len(), |i, j| columns[j][i]);

        Ok(Self {
            matrix,
            column_names: names,
            intercept,
            term_columns,
        })
    }

    /// The full `n x p` matrix
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Column range of the `index`-th formula term
    pub fn term_columns(&self, index: usize) -> Range<usize> {
        self.term_columns[index].clone()
    }

    /// Intercept column plus the columns of the selected terms, in order
    pub fn columns_for_terms(&self, terms: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut selected: Vec<usize> = self.intercept.into_iter().collect();
        for t in terms {
            selected.extend(self.term_columns[t].clone());
        }
        selected.sort_unstable();
        selected
    }

    /// Sub-matrix of the selected columns
    pub fn select(&self, columns: &[usize]) -> DMatrix<f64> {
        self.matrix.select_columns(columns.iter())
    }
}

fn factor_block(factor: &Factor, frame: &ModelFrame, full: bool) -> Result<Block> {
    let variable = frame
        .variable(&factor.name)
        .ok_or_else(|| Error::UnknownColumn(factor.name.clone()))?;

    match variable {
        Variable::Numeric(values) => Ok(Block {
            names: vec![factor.name.clone()],
            columns: vec![values.clone()],
        }),
        Variable::Categorical { codes, levels } => {
            let skip = usize::from(!full);
            let mut names = Vec::new();
            let mut columns = Vec::new();
            for (level_index, level) in levels.iter().enumerate().skip(skip) {
                names.push(if full {
                    format!("C({})[{}]", factor.name, level)
                } else {
                    format!("C({})[T.{}]", factor.name, level)
                });
                columns.push(
                    codes
                        .iter()
                        .map(|&c| if c == level_index { 1.0 } else { 0.0 })
                        .collect(),
                );
            }
            Ok(Block { names, columns })
        }
    }
}

/// Row-wise product of every column pair, left factor varying slowest
fn cross(left: Block, right: Block) -> Block {
    let mut names = Vec::with_capacity(left.names.len() * right.names.len());
    let mut columns = Vec::with_capacity(names.capacity());
    for (lname, lcol) in left.names.iter().zip(&left.columns) {
        for (rname, rcol) in right.names.iter().zip(&right.columns) {
            names.push(if lname.is_empty() {
                rname.clone()
            } else {
                format!("{lname}:{rname}")
            });
            columns.push(lcol.iter().zip(rcol).map(|(a, b)| a * b).collect());
        }
    }
    Block { names, columns }
}
