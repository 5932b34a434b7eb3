//! Periodic (harmonic) regression of a monthly climatology
//!
//! The seasonal cycle at a grid cell is approximated by a truncated Fourier series
//! holding the annual and semiannual harmonics:
//!
//! $$ \hat{y}_m = c_0 + c_1 \cos\left(\frac{2\pi m}{12}\right) + c_2 \sin\left(\frac{2\pi m}{12}\right)
//!    + c_3 \cos\left(\frac{4\pi m}{12}\right) + c_4 \sin\left(\frac{4\pi m}{12}\right) $$
//!
//! for calendar months $m = 1, \dots, 12$. The coefficients are the ordinary least squares
//! solution against the twelve monthly values. The period is fixed at twelve months;
//! other sampling frequencies are not supported.

use crate::climatology::MONTHS_PER_YEAR;
use crate::errors::{CordexError, CordexResult};
use crate::utils::linear_algebra::pseudo_inverse;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of predictors in the harmonic model (constant plus two harmonics)
pub const N_PREDICTORS: usize = 5;

/// Build the 12 x 5 design matrix of the harmonic model.
///
/// Columns are `1, cos(2πm/12), sin(2πm/12), cos(4πm/12), sin(4πm/12)` with `m = 1..=12`.
pub fn design_matrix() -> DMatrix<f64> {
    DMatrix::from_fn(MONTHS_PER_YEAR, N_PREDICTORS, |row, col| {
        let month = (row + 1) as f64;
        let angle = 2.0 * PI * month / MONTHS_PER_YEAR as f64;
        match col {
            0 => 1.0,
            1 => angle.cos(),
            2 => angle.sin(),
            3 => (2.0 * angle).cos(),
            _ => (2.0 * angle).sin(),
        }
    })
}

/// Result of fitting the harmonic model to one 12-month climatology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicFit {
    /// Least squares coefficients, in design matrix column order
    coefficients: [f64; N_PREDICTORS],
    /// Model evaluated at each calendar month
    fitted: Array1<f64>,
}

impl HarmonicFit {
    pub fn coefficients(&self) -> &[f64; N_PREDICTORS] {
        &self.coefficients
    }

    pub fn fitted(&self) -> &Array1<f64> {
        &self.fitted
    }

    pub fn into_fitted(self) -> Array1<f64> {
        self.fitted
    }

    /// Constant term, the annual mean of the fitted cycle
    pub fn mean(&self) -> f64 {
        self.coefficients[0]
    }

    /// Amplitude of the annual (12 month) harmonic
    pub fn annual_amplitude(&self) -> f64 {
        self.coefficients[1].hypot(self.coefficients[2])
    }

    /// Phase of the annual harmonic in radians
    ///
    /// The harmonic is written as `A cos(2πm/12 - φ)`, so `φ / (2π) * 12` is the month of
    /// the annual peak.
    pub fn annual_phase(&self) -> f64 {
        self.coefficients[2].atan2(self.coefficients[1])
    }

    /// Amplitude of the semiannual (6 month) harmonic
    pub fn semiannual_amplitude(&self) -> f64 {
        self.coefficients[3].hypot(self.coefficients[4])
    }

    /// Phase of the semiannual harmonic in radians, as `A cos(4πm/12 - φ)`
    pub fn semiannual_phase(&self) -> f64 {
        self.coefficients[4].atan2(self.coefficients[3])
    }
}

/// Reusable harmonic regression
///
/// The design matrix is the same for every grid cell, so its pseudo-inverse is computed
/// once and applied to each 12-month vector. The pseudo-inverse yields the minimum-norm
/// least squares solution, so rank deficiency never causes a failure.
#[derive(Debug, Clone)]
pub struct HarmonicRegression {
    design: DMatrix<f64>,
    pseudo_inverse: DMatrix<f64>,
}

impl HarmonicRegression {
    pub fn new() -> CordexResult<Self> {
        let design = design_matrix();
        let pseudo_inverse = pseudo_inverse(&design)?;
        Ok(Self {
            design,
            pseudo_inverse,
        })
    }

    pub fn design(&self) -> &DMatrix<f64> {
        &self.design
    }

    /// Fit the harmonic model to a 12-value monthly climatology
    ///
    /// Returns `CordexError::ShapeMismatch` if `values` does not hold exactly 12 entries.
    pub fn fit(&self, values: ArrayView1<f64>) -> CordexResult<HarmonicFit> {
        if values.len() != MONTHS_PER_YEAR {
            return Err(CordexError::ShapeMismatch {
                axis: "month",
                expected: MONTHS_PER_YEAR,
                got: values.len(),
            });
        }

        let rhs = DVector::from_iterator(MONTHS_PER_YEAR, values.iter().copied());
        let beta = &self.pseudo_inverse * rhs;
        let fitted = &self.design * &beta;

        let mut coefficients = [0.0; N_PREDICTORS];
        coefficients.copy_from_slice(beta.as_slice());

        Ok(HarmonicFit {
            coefficients,
            fitted: Array1::from_iter(fitted.iter().copied()),
        })
    }
}

/// Fit the harmonic model to a 12-value monthly climatology and return the fitted values.
///
/// Convenience wrapper around [`HarmonicRegression`] for a single series. When fitting many
/// grid cells, construct one [`HarmonicRegression`] and reuse it.
///
/// # Example
///
/// ```rust
/// use cordex_core::harmonic::monthly_regression;
/// use ndarray::Array1;
/// use std::f64::consts::PI;
///
/// let cycle = Array1::from_iter((1..=12).map(|m| 5.0 + (2.0 * PI * m as f64 / 12.0).sin()));
/// let fitted = monthly_regression(cycle.view()).unwrap();
///
/// for (a, b) in cycle.iter().zip(fitted.iter()) {
///     assert!((a - b).abs() < 1e-10);
/// }
/// ```
pub fn monthly_regression(values: ArrayView1<f64>) -> CordexResult<Array1<f64>> {
    Ok(HarmonicRegression::new()?.fit(values)?.into_fitted())
}
