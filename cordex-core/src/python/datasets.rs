use crate::catalog::{self, CatalogConfig};
use crate::registry::ModelKey;
use pyo3::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Count, for each dataset of the primary variable, the complementary variables available.
///
/// Returns a dict mapping the count to a list of `(dataset_key, [variable, ...])`.
#[pyfunction]
#[pyo3(name = "available_complementary_variables")]
pub fn py_available_complementary_variables(
    root_path: PathBuf,
    experiment_category: String,
    primary_variable: String,
    complementary_variables: Vec<String>,
) -> PyResult<BTreeMap<usize, Vec<(String, Vec<String>)>>> {
    let config = CatalogConfig {
        root: root_path,
        experiment: experiment_category,
        primary_variable,
        complementary_variables,
        ..Default::default()
    };
    let table = catalog::available_complementary_variables(&config)?;

    Ok(table
        .into_iter()
        .map(|(count, entries)| {
            let entries = entries
                .into_iter()
                .map(|a| (a.dataset, a.variables))
                .collect();
            (count, entries)
        })
        .collect())
}

/// Group model folders under `base_dir` by their number of auxiliary variable folders.
#[pyfunction]
#[pyo3(name = "count_auxiliary_variables")]
pub fn py_count_auxiliary_variables(
    base_dir: PathBuf,
    principal_variable: &str,
) -> PyResult<BTreeMap<usize, Vec<String>>> {
    Ok(catalog::count_auxiliary_variables(
        base_dir,
        principal_variable,
    )?)
}

/// Move model files into per-model folders. Returns `(file, model_folder)` pairs.
///
/// `extension` defaults to the catalog default (`nc`).
#[pyfunction]
#[pyo3(name = "sort_model_files_by_folder", signature = (data_path, extension = None))]
pub fn py_sort_model_files_by_folder(
    data_path: PathBuf,
    extension: Option<String>,
) -> PyResult<Vec<(String, String)>> {
    let mut config = CatalogConfig::default();
    if let Some(extension) = extension {
        config.extension = extension;
    }
    let report = catalog::sort_model_files(data_path, &config)?;
    Ok(report
        .moved
        .into_iter()
        .map(|m| (m.file, m.model))
        .collect())
}

/// Indented listing of the directories below `path`.
#[pyfunction]
#[pyo3(name = "folder_tree")]
pub fn py_folder_tree(path: PathBuf) -> PyResult<String> {
    Ok(catalog::folder_tree(path)?)
}

/// Registry name of a simulation: `{model_id}_{driving_model_id}_{domain}`.
#[pyfunction]
#[pyo3(name = "model_name")]
pub fn py_model_name(model_id: &str, driving_model_id: &str, domain: &str) -> String {
    ModelKey::new(model_id, driving_model_id, domain).to_string()
}
