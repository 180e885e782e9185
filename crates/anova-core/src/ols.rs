//! Ordinary Least Squares fitting from a formula

use nalgebra::{DMatrix, DVector};
use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use crate::{DesignMatrix, Error, Formula, ModelFrame, Result};

/// An unfitted linear model: parsed formula, model frame and design matrix
#[derive(Debug, Clone)]
pub struct OlsModel {
    formula: Formula,
    frame: ModelFrame,
    design: DesignMatrix,
}

/// Build an OLS model from a formula string and a dataset
///
/// # Example
///
/// ```rust,ignore
/// let fit = anova_core::ols("Score ~ C(Group)", &df)?.fit()?;
/// println!("R^2 = {:.3}", fit.r_squared());
/// ```
pub fn ols(formula: &str, data: &DataFrame) -> Result<OlsModel> {
    OlsModel::from_formula(formula, data)
}

impl OlsModel {
    pub fn from_formula(formula: &str, data: &DataFrame) -> Result<Self> {
        let formula = Formula::parse(formula)?;
        let frame = ModelFrame::from_dataframe(&formula, data)?;
        let design = DesignMatrix::build(&formula, &frame)?;
        Ok(Self {
            formula,
            frame,
            design,
        })
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn frame(&self) -> &ModelFrame {
        &self.frame
    }

    pub fn design(&self) -> &DesignMatrix {
        &self.design
    }

    /// Fit the model by least squares
    #[instrument(level = "debug", skip(self), fields(formula = %self.formula))]
    pub fn fit(self) -> Result<OlsFit> {
        let y = DVector::from_column_slice(self.frame.response());
        let solution = least_squares(self.design.matrix(), &y)?;

        let n = self.frame.n_obs();
        let df_resid = n.saturating_sub(solution.rank);
        let intercept = usize::from(self.formula.has_intercept);
        let df_model = solution.rank.saturating_sub(intercept);

        let fitted = self.design.matrix() * &solution.coefficients;
        let mean = y.mean();
        let tss = if self.formula.has_intercept {
            y.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        } else {
            y.norm_squared()
        };

        debug!(
            "OLS fit: n={}, rank={}, rss={:.6}, df_resid={}",
            n, solution.rank, solution.rss, df_resid
        );

        Ok(OlsFit {
            model: self,
            y,
            params: solution.coefficients,
            fitted,
            rss: solution.rss,
            tss,
            rank: solution.rank,
            df_resid,
            df_model,
        })
    }
}

/// A fitted OLS model
#[derive(Debug, Clone)]
pub struct OlsFit {
    model: OlsModel,
    y: DVector<f64>,
    params: DVector<f64>,
    fitted: DVector<f64>,
    rss: f64,
    tss: f64,
    rank: usize,
    df_resid: usize,
    df_model: usize,
}

impl OlsFit {
    pub fn model(&self) -> &OlsModel {
        &self.model
    }

    /// Coefficients paired with their design column names
    pub fn params(&self) -> Vec<(&str, f64)> {
        self.model
            .design
            .column_names()
            .iter()
            .map(String::as_str)
            .zip(self.params.iter().copied())
            .collect()
    }

    pub fn fitted_values(&self) -> &DVector<f64> {
        &self.fitted
    }

    pub fn residuals(&self) -> DVector<f64> {
        &self.y - &self.fitted
    }

    pub fn response(&self) -> &DVector<f64> {
        &self.y
    }

    /// Residual sum of squares
    pub fn ssr(&self) -> f64 {
        self.rss
    }

    /// Rank of the design matrix
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn df_resid(&self) -> usize {
        self.df_resid
    }

    pub fn df_model(&self) -> usize {
        self.df_model
    }

    pub fn nobs(&self) -> usize {
        self.y.len()
    }

    /// Residual mean square; NaN when there are no residual degrees of freedom
    pub fn scale(&self) -> f64 {
        if self.df_resid == 0 {
            f64::NAN
        } else {
            self.rss / self.df_resid as f64
        }
    }

    pub fn r_squared(&self) -> f64 {
        if self.tss > 0.0 {
            1.0 - self.rss / self.tss
        } else {
            f64::NAN
        }
    }
}

/// Least-squares solution of `x * b = y`
#[derive(Debug, Clone)]
pub(crate) struct LeastSquares {
    pub coefficients: DVector<f64>,
    pub rss: f64,
    pub rank: usize,
}

/// Minimum-norm least squares via SVD
///
/// Singular values below `max(n, p) * sigma_max * EPSILON` are treated as
/// zero, so rank-deficient designs still produce a solution.
pub(crate) fn least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LeastSquares> {
    if x.nrows() != y.len() {
        return Err(Error::InvalidInput(format!(
            "Size mismatch in least squares: design has {} rows, response has {}",
            x.nrows(),
            y.len()
        )));
    }

    if x.ncols() == 0 {
        return Ok(LeastSquares {
            coefficients: DVector::zeros(0),
            rss: y.norm_squared(),
            rank: 0,
        });
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    let eps = x.nrows().max(x.ncols()) as f64 * sigma_max * f64::EPSILON;
    let rank = svd.rank(eps);

    let coefficients = if rank == 0 {
        DVector::zeros(x.ncols())
    } else {
        svd.solve(y, eps)
            .map_err(|e| Error::Computation(e.to_string()))?
    };

    let residuals = y - x * &coefficients;
    Ok(LeastSquares {
        coefficients,
        rss: residuals.norm_squared(),
        rank,
    })
}
