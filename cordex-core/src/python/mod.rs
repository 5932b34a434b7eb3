//! Python bindings
//!
//! Three submodules are exposed:
//! - `climatology`: monthly means, harmonic fits and anomaly series over NumPy arrays
//! - `catalog`: dataset discovery and file organisation
//! - `labels`: axis label formatters

use crate::errors::CordexError;
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::{pymodule, wrap_pyfunction, Bound, PyResult};

mod datasets;
mod engine;

impl From<CordexError> for PyErr {
    fn from(err: CordexError) -> PyErr {
        match err {
            CordexError::Io { .. } => PyOSError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[pymodule]
pub fn climatology(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("MONTHS_PER_YEAR", crate::climatology::MONTHS_PER_YEAR)?;
    m.add_function(wrap_pyfunction!(engine::py_monthly_mean, m)?)?;
    m.add_function(wrap_pyfunction!(engine::py_monthly_regression, m)?)?;
    m.add_function(wrap_pyfunction!(engine::py_harmonic_coefficients, m)?)?;
    m.add_function(wrap_pyfunction!(engine::py_monthly_anomaly_series, m)?)?;
    Ok(())
}

#[pymodule]
pub fn catalog(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(
        datasets::py_available_complementary_variables,
        m
    )?)?;
    m.add_function(wrap_pyfunction!(datasets::py_count_auxiliary_variables, m)?)?;
    m.add_function(wrap_pyfunction!(datasets::py_sort_model_files_by_folder, m)?)?;
    m.add_function(wrap_pyfunction!(datasets::py_folder_tree, m)?)?;
    m.add_function(wrap_pyfunction!(datasets::py_model_name, m)?)?;
    Ok(())
}

/// Format a fraction as a percentage label
#[pyfunction]
#[pyo3(name = "percent_label")]
fn py_percent_label(x: f64) -> String {
    crate::labels::percent_label(x)
}

/// Format a kg/kg value as a g/kg label
#[pyfunction]
#[pyo3(name = "grams_label")]
fn py_grams_label(x: f64) -> String {
    crate::labels::grams_label(x)
}

#[pymodule]
pub fn labels(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_percent_label, m)?)?;
    m.add_function(wrap_pyfunction!(py_grams_label, m)?)?;
    Ok(())
}
