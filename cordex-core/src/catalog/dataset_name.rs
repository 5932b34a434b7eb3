//! CORDEX dataset folder names
//!
//! Folders follow the pattern
//! `{variable}_{domain}_{driving_model}_{experiment}_{ensemble}_{model_id}_{rcm_version}_{frequency}`,
//! for example `tas_EUR-11_CNRM-CERFACS-CNRM-CM5_historical_r1i1p1_CNRM-ALADIN63_v1_mon`.
//!
//! Stripping the leading variable and the trailing frequency leaves a key that identifies
//! the same simulation across every variable folder.

use crate::errors::{CordexError, CordexResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '_';

/// A parsed dataset folder name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetName {
    variable: String,
    key: String,
    frequency: String,
}

/// Named fields of a dataset key with the standard six middle components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetComponents {
    pub domain: String,
    pub driving_model: String,
    pub experiment: String,
    pub ensemble: String,
    pub model_id: String,
    pub rcm_version: String,
}

impl DatasetName {
    /// Parse a folder name
    ///
    /// At least three non-empty underscore-separated fields are required: variable,
    /// one or more key fields, frequency.
    ///
    /// ```rust
    /// use cordex_core::catalog::DatasetName;
    ///
    /// let name = DatasetName::parse(
    ///     "tas_EUR-11_CNRM-CERFACS-CNRM-CM5_historical_r1i1p1_CNRM-ALADIN63_v1_mon",
    /// )
    /// .unwrap();
    /// assert_eq!(name.variable(), "tas");
    /// assert_eq!(name.frequency(), "mon");
    /// assert_eq!(
    ///     name.key(),
    ///     "EUR-11_CNRM-CERFACS-CNRM-CM5_historical_r1i1p1_CNRM-ALADIN63_v1"
    /// );
    /// ```
    pub fn parse(name: &str) -> CordexResult<Self> {
        let fields: Vec<&str> = name.split(SEPARATOR).collect();
        if fields.len() < 3 || fields.iter().any(|f| f.is_empty()) {
            return Err(CordexError::InvalidDatasetName(name.to_string()));
        }

        let last = fields.len() - 1;
        Ok(Self {
            variable: fields[0].to_string(),
            key: fields[1..last].join("_"),
            frequency: fields[last].to_string(),
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Folder name without the variable prefix and frequency suffix
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    /// Named components, if the key has the standard six fields
    pub fn components(&self) -> Option<DatasetComponents> {
        let fields: Vec<&str> = self.key.split(SEPARATOR).collect();
        match fields.as_slice() {
            [domain, driving_model, experiment, ensemble, model_id, rcm_version] => {
                Some(DatasetComponents {
                    domain: domain.to_string(),
                    driving_model: driving_model.to_string(),
                    experiment: experiment.to_string(),
                    ensemble: ensemble.to_string(),
                    model_id: model_id.to_string(),
                    rcm_version: rcm_version.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl FromStr for DatasetName {
    type Err = CordexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.variable, self.key, self.frequency)
    }
}
