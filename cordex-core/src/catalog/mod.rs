//! Discovery and organisation of CORDEX dataset folders
//!
//! All functions here act only when called; nothing touches the filesystem on load.
//!
//! - [`CatalogConfig`]: where datasets live and which variables matter
//! - [`DatasetName`]: parsing of `{variable}_{...}_{frequency}` folder names
//! - [`available_complementary_variables`] / [`count_auxiliary_variables`]: availability tables
//! - [`sort_model_files`] / [`sort_model_files_by_folder`] / [`folder_tree`]: housekeeping of raw downloads

mod availability;
mod config;
mod dataset_name;
mod organize;

pub use availability::{
    available_complementary_variables, count_auxiliary_variables, Availability,
    AvailabilityTable,
};
pub use config::CatalogConfig;
pub use dataset_name::{DatasetComponents, DatasetName};
pub use organize::{
    folder_tree, model_folder_name, sort_model_files, sort_model_files_by_folder, FileMove,
    SortReport,
};
