//! Which variables are available for which simulations
//!
//! Two questions are answered here:
//!
//! - For every dataset of the primary variable, how many (and which) complementary
//!   variables have a dataset for the same simulation
//!   ([`available_complementary_variables`]).
//! - For every model folder holding the principal variable, how many auxiliary variable
//!   folders sit next to it ([`count_auxiliary_variables`]).

use crate::catalog::config::CatalogConfig;
use crate::catalog::dataset_name::DatasetName;
use crate::errors::{CordexError, CordexResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use walkdir::WalkDir;

/// Complementary variables found for one primary dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Dataset key shared across variables (see [`DatasetName::key`])
    pub dataset: String,
    /// Complementary variables with a matching dataset, in configuration order
    pub variables: Vec<String>,
}

/// Primary datasets grouped by the number of complementary variables available
pub type AvailabilityTable = BTreeMap<usize, Vec<Availability>>;

/// Names of the immediate sub-directories of `path`, sorted
pub(crate) fn list_subdirectories(path: &Path) -> CordexResult<Vec<String>> {
    let entries = std::fs::read_dir(path).map_err(|e| CordexError::io(path, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CordexError::io(path, e))?;
        let file_type = entry.file_type().map_err(|e| CordexError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!("Skipping non UTF-8 folder name {:?}", name),
        }
    }
    names.sort();
    Ok(names)
}

/// Parse every dataset folder in `path`, skipping names that do not follow the pattern
fn list_datasets(path: &Path) -> CordexResult<Vec<DatasetName>> {
    Ok(list_subdirectories(path)?
        .into_iter()
        .filter_map(|folder| match DatasetName::parse(&folder) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect())
}

/// Count the complementary variables available for each primary dataset
///
/// Lists `{root}/{experiment}/{primary_variable}` and
/// `{root}/{experiment}/{complementary}` for each complementary variable. A primary
/// dataset matches a complementary variable when one of its folders has the same
/// dataset key.
///
/// # Errors
///
/// * `CordexError::Config` if the configuration is invalid
/// * `CordexError::Io` if the primary variable folder cannot be read
///
/// A missing complementary variable folder is not an error; it simply contributes no
/// matches.
pub fn available_complementary_variables(
    config: &CatalogConfig,
) -> CordexResult<AvailabilityTable> {
    config.validate()?;

    let primary = list_datasets(&config.variable_dir(&config.primary_variable))?;

    let mut complementary: Vec<(&str, HashSet<String>)> = Vec::new();
    for variable in &config.complementary_variables {
        let dir = config.variable_dir(variable);
        let keys = if dir.is_dir() {
            list_datasets(&dir)?
                .into_iter()
                .map(|name| name.key().to_string())
                .collect()
        } else {
            warn!(
                "No folder for complementary variable {} at {}",
                variable,
                dir.display()
            );
            HashSet::new()
        };
        complementary.push((variable.as_str(), keys));
    }

    let mut table = AvailabilityTable::new();
    for dataset in &primary {
        let variables: Vec<String> = complementary
            .iter()
            .filter(|(_, keys)| keys.contains(dataset.key()))
            .map(|(variable, _)| variable.to_string())
            .collect();

        table.entry(variables.len()).or_default().push(Availability {
            dataset: dataset.key().to_string(),
            variables,
        });
    }

    debug!(
        "{} {} datasets checked against {} complementary variables",
        primary.len(),
        config.primary_variable,
        config.complementary_variables.len()
    );
    Ok(table)
}

/// Group model folders by their number of auxiliary variables
///
/// Walks `base_dir` recursively. Every directory whose name ends with `principal` is a
/// model folder; its auxiliary variables are the distinct names of its sub-directories
/// other than `principal` itself.
///
/// Returns model folder names keyed by auxiliary variable count, names sorted.
pub fn count_auxiliary_variables(
    base_dir: impl AsRef<Path>,
    principal: &str,
) -> CordexResult<BTreeMap<usize, Vec<String>>> {
    let base_dir = base_dir.as_ref();
    if principal.is_empty() {
        return Err(CordexError::Config(
            "principal variable must not be empty".into(),
        ));
    }

    let mut result: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(base_dir).to_path_buf();
            CordexError::io(path, e.into())
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let model = entry.file_name().to_string_lossy();
        if !model.ends_with(principal) {
            continue;
        }

        let auxiliary: BTreeSet<String> = list_subdirectories(entry.path())?
            .into_iter()
            .filter(|name| name != principal)
            .collect();

        result
            .entry(auxiliary.len())
            .or_default()
            .push(model.into_owned());
    }

    for models in result.values_mut() {
        models.sort();
    }
    Ok(result)
}
