use crate::harmonic::HarmonicRegression;
use numpy::{IntoPyArray, PyArray1, PyArray3, PyReadonlyArray1, PyReadonlyArray3};
use pyo3::prelude::*;

type AnomalyArrays<'py> = (
    Bound<'py, PyArray3<f64>>,
    Bound<'py, PyArray3<f64>>,
    Bound<'py, PyArray3<f64>>,
);

/// Average of each calendar month over the complete years of `time_series`.
///
/// Parameters
/// ----------
/// time_series : ndarray, shape (T, n_lat, n_lon)
/// lat : ndarray, shape (n_lat,)
/// lon : ndarray, shape (n_lon,)
///
/// Returns
/// -------
/// ndarray, shape (12, n_lat, n_lon)
#[pyfunction]
#[pyo3(name = "monthly_mean")]
pub fn py_monthly_mean<'py>(
    py: Python<'py>,
    time_series: PyReadonlyArray3<'py, f64>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray3<f64>>> {
    let mean = crate::climatology::monthly_mean(
        time_series.as_array(),
        lat.as_array(),
        lon.as_array(),
    )?;
    Ok(mean.into_pyarray_bound(py))
}

/// Annual plus semiannual harmonic fit of a 12-value monthly climatology.
#[pyfunction]
#[pyo3(name = "monthly_regression")]
pub fn py_monthly_regression<'py>(
    py: Python<'py>,
    time_series: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let fitted = crate::harmonic::monthly_regression(time_series.as_array())?;
    Ok(fitted.into_pyarray_bound(py))
}

/// Least squares coefficients `[c0, cos1, sin1, cos2, sin2]` of the harmonic fit.
#[pyfunction]
#[pyo3(name = "harmonic_coefficients")]
pub fn py_harmonic_coefficients(time_series: PyReadonlyArray1<'_, f64>) -> PyResult<Vec<f64>> {
    let fit = HarmonicRegression::new()?.fit(time_series.as_array())?;
    Ok(fit.coefficients().to_vec())
}

/// Remove the smoothed seasonal cycle from `time_series`.
///
/// Returns
/// -------
/// (anomaly_series, monthly_mean_fit, monthly_mean)
///     The first two have shape (floor(T / 12) * 12, n_lat, n_lon), the last (12, n_lat, n_lon).
#[pyfunction]
#[pyo3(name = "monthly_anomaly_series")]
pub fn py_monthly_anomaly_series<'py>(
    py: Python<'py>,
    time_series: PyReadonlyArray3<'py, f64>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
) -> PyResult<AnomalyArrays<'py>> {
    let result = crate::climatology::monthly_anomaly_series(
        time_series.as_array(),
        lat.as_array(),
        lon.as_array(),
    )?;
    Ok((
        result.anomalies.into_pyarray_bound(py),
        result.fitted.into_pyarray_bound(py),
        result.monthly_mean.into_pyarray_bound(py),
    ))
}
