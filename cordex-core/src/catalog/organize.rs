//! Filesystem housekeeping for downloaded model files

use crate::catalog::config::CatalogConfig;
use crate::errors::{CordexError, CordexResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// One file moved into its model folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMove {
    pub file: String,
    pub model: String,
}

/// Outcome of [`sort_model_files_by_folder`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortReport {
    pub moved: Vec<FileMove>,
    /// Matching files left in place because no model folder name could be derived
    pub skipped: Vec<String>,
}

impl SortReport {
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.skipped.is_empty()
    }
}

/// Model folder for a file name: every underscore-separated field but the last
///
/// ```rust
/// use cordex_core::catalog::model_folder_name;
///
/// assert_eq!(
///     model_folder_name("huss_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon_195101-195512.nc"),
///     Some("huss_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon".to_string())
/// );
/// assert_eq!(model_folder_name("orography.nc"), None);
/// ```
pub fn model_folder_name(file_name: &str) -> Option<String> {
    let (model, _) = file_name.rsplit_once('_')?;
    if model.is_empty() {
        None
    } else {
        Some(model.to_string())
    }
}

/// Move every `*.{extension}` file in `data_path` into a sub-folder named after its model
///
/// The folder name is taken from the file name with its last underscore-separated field
/// (usually the date range) removed. Folders are created as needed. Files are processed
/// in name order. A directory without matching files yields an empty report.
pub fn sort_model_files_by_folder(
    data_path: impl AsRef<Path>,
    extension: &str,
) -> CordexResult<SortReport> {
    let data_path = data_path.as_ref();
    let extension = extension.trim_start_matches('.');

    let mut files = Vec::new();
    for entry in fs::read_dir(data_path).map_err(|e| CordexError::io(data_path, e))? {
        let entry = entry.map_err(|e| CordexError::io(data_path, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != extension) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => warn!("Skipping non UTF-8 file name {:?}", name),
        }
    }
    files.sort();

    let mut report = SortReport::default();
    if files.is_empty() {
        info!("No .{} files in {}", extension, data_path.display());
        return Ok(report);
    }

    for file in files {
        let Some(model) = model_folder_name(&file) else {
            warn!("Cannot derive a model folder from {}, leaving it in place", file);
            report.skipped.push(file);
            continue;
        };

        let model_dir = data_path.join(&model);
        fs::create_dir_all(&model_dir).map_err(|e| CordexError::io(&model_dir, e))?;

        let target = model_dir.join(&file);
        fs::rename(data_path.join(&file), &target).map_err(|e| CordexError::io(&target, e))?;
        info!("Moved {} to {}", file, model);

        report.moved.push(FileMove { file, model });
    }

    info!(
        "Sorted {} files into model folders ({} skipped)",
        report.moved.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// [`sort_model_files_by_folder`] with the file extension taken from `config`
///
/// # Errors
///
/// * `CordexError::Config` if the configuration is invalid
/// * `CordexError::Io` if `data_path` cannot be read or a file cannot be moved
pub fn sort_model_files(
    data_path: impl AsRef<Path>,
    config: &CatalogConfig,
) -> CordexResult<SortReport> {
    config.validate()?;
    sort_model_files_by_folder(data_path, config.file_extension())
}

/// Indented listing of the directories under `path`, files excluded
///
/// Each directory is printed as `name/`, indented four spaces per level below `path`.
/// Siblings appear in name order.
pub fn folder_tree(path: impl AsRef<Path>) -> CordexResult<String> {
    let path = path.as_ref();
    let mut tree = String::new();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            CordexError::io(at, e.into())
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let indent = " ".repeat(4 * entry.depth());
        // writing to a String cannot fail
        let _ = writeln!(tree, "{}{}/", indent, entry.file_name().to_string_lossy());
    }
    Ok(tree)
}
