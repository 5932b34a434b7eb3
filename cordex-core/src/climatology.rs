//! Monthly climatology of gridded time series
//!
//! Grids are indexed as `(time, latitude, longitude)` with monthly time steps in
//! chronological order, the first step being January of some year. Only complete years
//! are used: a trailing partial year is dropped before any statistic is computed, so the
//! time length of every output is `floor(T / 12) * 12`.
//!
//! # Examples
//!
//! ```rust
//! use cordex_core::climatology::{monthly_anomaly_series, monthly_mean};
//! use ndarray::{Array1, Array3};
//!
//! // Three years plus five stray months on a 2 x 3 grid
//! let series = Array3::from_shape_fn((41, 2, 3), |(t, i, j)| (t % 12) as f64 + (i * j) as f64);
//! let lat = Array1::from_vec(vec![-33.5, -33.0]);
//! let lon = Array1::from_vec(vec![-71.0, -70.5, -70.0]);
//!
//! let mean = monthly_mean(series.view(), lat.view(), lon.view()).unwrap();
//! assert_eq!(mean.dim(), (12, 2, 3));
//!
//! let result = monthly_anomaly_series(series.view(), lat.view(), lon.view()).unwrap();
//! assert_eq!(result.anomalies.dim(), (36, 2, 3));
//! assert_eq!(result.years(), 3);
//! ```

use crate::errors::{CordexError, CordexResult};
use crate::harmonic::HarmonicRegression;
use log::debug;
use ndarray::{s, Array3, ArrayView1, ArrayView3, Axis};
use serde::{Deserialize, Serialize};

/// Number of monthly time steps in one year of data
pub const MONTHS_PER_YEAR: usize = 12;

/// Number of complete years contained in `time_steps` monthly samples
pub fn complete_years(time_steps: usize) -> usize {
    time_steps / MONTHS_PER_YEAR
}

/// View of `series` restricted to its complete years
pub fn truncate_to_complete_years(series: ArrayView3<'_, f64>) -> ArrayView3<'_, f64> {
    let n = complete_years(series.len_of(Axis(0))) * MONTHS_PER_YEAR;
    series.slice_move(s![..n, .., ..])
}

/// Check the coordinate lengths against the grid and return the number of complete years.
fn validate_grid(
    series: &ArrayView3<f64>,
    lat: &ArrayView1<f64>,
    lon: &ArrayView1<f64>,
) -> CordexResult<usize> {
    let (time_steps, n_lat, n_lon) = series.dim();

    if lat.len() != n_lat {
        return Err(CordexError::ShapeMismatch {
            axis: "latitude",
            expected: n_lat,
            got: lat.len(),
        });
    }
    if lon.len() != n_lon {
        return Err(CordexError::ShapeMismatch {
            axis: "longitude",
            expected: n_lon,
            got: lon.len(),
        });
    }
    if time_steps < MONTHS_PER_YEAR {
        return Err(CordexError::InsufficientData { time_steps });
    }

    let years = complete_years(time_steps);
    let dropped = time_steps - years * MONTHS_PER_YEAR;
    if dropped > 0 {
        debug!(
            "Dropping {} trailing months outside the {} complete years",
            dropped, years
        );
    }
    Ok(years)
}

/// Average of each calendar month over the complete years of an already validated series.
fn calendar_month_average(series: ArrayView3<f64>, years: usize) -> Array3<f64> {
    let (_, n_lat, n_lon) = series.dim();
    let mut sum = Array3::<f64>::zeros((MONTHS_PER_YEAR, n_lat, n_lon));

    for year in series
        .slice(s![..years * MONTHS_PER_YEAR, .., ..])
        .axis_chunks_iter(Axis(0), MONTHS_PER_YEAR)
    {
        sum += &year;
    }
    sum / years as f64
}

/// Average seasonal cycle of a monthly gridded series
///
/// # Arguments
///
/// * `series` - Monthly values with shape `(T, n_lat, n_lon)`
/// * `lat` - Latitude coordinates (length `n_lat`)
/// * `lon` - Longitude coordinates (length `n_lon`)
///
/// # Returns
///
/// Array of shape `(12, n_lat, n_lon)` holding, for each calendar month and grid cell,
/// the arithmetic mean over the `floor(T / 12)` complete years.
///
/// # Errors
///
/// * `CordexError::InsufficientData` if `T < 12`
/// * `CordexError::ShapeMismatch` if the coordinate lengths do not match the grid
pub fn monthly_mean(
    series: ArrayView3<f64>,
    lat: ArrayView1<f64>,
    lon: ArrayView1<f64>,
) -> CordexResult<Array3<f64>> {
    let years = validate_grid(&series, &lat, &lon)?;
    Ok(calendar_month_average(series, years))
}

/// Fit the harmonic model independently at every grid cell of a monthly mean field.
///
/// `monthly_mean` must have shape `(12, n_lat, n_lon)`; the result has the same shape.
pub fn harmonic_fit_field(monthly_mean: ArrayView3<f64>) -> CordexResult<Array3<f64>> {
    let months = monthly_mean.len_of(Axis(0));
    if months != MONTHS_PER_YEAR {
        return Err(CordexError::ShapeMismatch {
            axis: "month",
            expected: MONTHS_PER_YEAR,
            got: months,
        });
    }

    let regression = HarmonicRegression::new()?;
    let mut fitted = Array3::<f64>::zeros(monthly_mean.raw_dim());

    for (mut cell_fit, cell_mean) in fitted
        .lanes_mut(Axis(0))
        .into_iter()
        .zip(monthly_mean.lanes(Axis(0)))
    {
        cell_fit.assign(regression.fit(cell_mean)?.fitted());
    }
    Ok(fitted)
}

/// Repeat a `(12, n_lat, n_lon)` annual cycle `years` times along the time axis.
pub fn tile_years(cycle: ArrayView3<f64>, years: usize) -> Array3<f64> {
    let (months, n_lat, n_lon) = cycle.dim();
    let mut tiled = Array3::<f64>::zeros((months * years, n_lat, n_lon));
    for mut year in tiled.axis_chunks_iter_mut(Axis(0), months.max(1)) {
        year.assign(&cycle);
    }
    tiled
}

/// Decomposition of a monthly series into a smoothed seasonal cycle and anomalies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAnomalies {
    /// Truncated input minus `fitted`, shape `(Y * 12, n_lat, n_lon)`
    pub anomalies: Array3<f64>,
    /// Harmonic fit of the monthly mean repeated for each complete year, same shape as `anomalies`
    pub fitted: Array3<f64>,
    /// Raw average of each calendar month, shape `(12, n_lat, n_lon)`
    pub monthly_mean: Array3<f64>,
}

impl MonthlyAnomalies {
    /// Number of complete years covered by the anomaly series
    pub fn years(&self) -> usize {
        complete_years(self.anomalies.len_of(Axis(0)))
    }

    /// The smoothed annual cycle (first year of `fitted`)
    ///
    /// `None` if `fitted` holds less than one year, which only happens for values built
    /// or deserialized by hand.
    pub fn annual_cycle(&self) -> Option<ArrayView3<'_, f64>> {
        if self.fitted.len_of(Axis(0)) < MONTHS_PER_YEAR {
            return None;
        }
        Some(self.fitted.slice(s![..MONTHS_PER_YEAR, .., ..]))
    }
}

/// Remove the smoothed seasonal cycle from a monthly gridded series
///
/// Computes the [`monthly_mean`] field, fits the annual plus semiannual harmonic model at
/// each grid cell, tiles the fitted cycle over the complete years and subtracts it from
/// the truncated input.
///
/// The anomalies are not guaranteed to have zero mean per calendar month since the
/// harmonic fit smooths the raw monthly means.
///
/// # Errors
///
/// Same as [`monthly_mean`].
pub fn monthly_anomaly_series(
    series: ArrayView3<f64>,
    lat: ArrayView1<f64>,
    lon: ArrayView1<f64>,
) -> CordexResult<MonthlyAnomalies> {
    let years = validate_grid(&series, &lat, &lon)?;
    let (_, n_lat, n_lon) = series.dim();
    debug!(
        "Computing monthly anomalies over {} years on a {}x{} grid",
        years, n_lat, n_lon
    );

    let monthly_mean = calendar_month_average(series.view(), years);
    let cycle = harmonic_fit_field(monthly_mean.view())?;
    let fitted = tile_years(cycle.view(), years);
    let anomalies = &truncate_to_complete_years(series) - &fitted;

    Ok(MonthlyAnomalies {
        anomalies,
        fitted,
        monthly_mean,
    })
}
