//! Catalog configuration
//!
//! Describes where CORDEX dataset folders live and which variables to look for.
//! The on-disk layout is `{root}/{experiment}/{variable}/{dataset folder}`.

use crate::errors::{CordexError, CordexResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Settings for discovering and organising CORDEX datasets
///
/// Missing fields fall back to their defaults when deserializing, so a TOML file only
/// needs to list what differs:
///
/// ```rust
/// use cordex_core::catalog::CatalogConfig;
///
/// let config = CatalogConfig::from_toml_str(
///     r#"
///     primary_variable = "tas"
///     complementary_variables = ["pr", "huss"]
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.experiment, "historical");
/// assert_eq!(config.complementary_variables.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding one sub-directory per experiment
    /// default: cordex_models
    pub root: PathBuf,

    /// Experiment category (historical, rcp45, rcp85, ...)
    /// default: historical
    pub experiment: String,

    /// Variable whose datasets drive the availability search
    /// default: huss
    pub primary_variable: String,

    /// Variables checked for a dataset matching each primary dataset
    /// default: empty
    pub complementary_variables: Vec<String>,

    /// Extension of raw model files, with or without the leading dot
    /// default: nc
    pub extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("cordex_models"),
            experiment: "historical".to_string(),
            primary_variable: "huss".to_string(),
            complementary_variables: Vec::new(),
            extension: "nc".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> CordexResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| CordexError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> CordexResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CordexError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CordexResult<()> {
        if self.experiment.trim().is_empty() {
            return Err(CordexError::Config("experiment must not be empty".into()));
        }
        if self.primary_variable.trim().is_empty() {
            return Err(CordexError::Config(
                "primary_variable must not be empty".into(),
            ));
        }
        if self.file_extension().is_empty() {
            return Err(CordexError::Config("extension must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for variable in &self.complementary_variables {
            if variable == &self.primary_variable {
                return Err(CordexError::Config(format!(
                    "{} is both the primary and a complementary variable",
                    variable
                )));
            }
            if !seen.insert(variable.as_str()) {
                return Err(CordexError::Config(format!(
                    "complementary variable {} is listed twice",
                    variable
                )));
            }
        }
        Ok(())
    }

    /// Extension without the leading dot
    pub fn file_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// `{root}/{experiment}`
    pub fn experiment_dir(&self) -> PathBuf {
        self.root.join(&self.experiment)
    }

    /// `{root}/{experiment}/{variable}`
    pub fn variable_dir(&self, variable: &str) -> PathBuf {
        self.experiment_dir().join(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_historical_huss_layout() {
        let config = CatalogConfig::default();
        assert_eq!(config.root, PathBuf::from("cordex_models"));
        assert_eq!(
            config.variable_dir("huss"),
            PathBuf::from("cordex_models").join("historical").join("huss")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml_str(r#"experiment = "rcp85""#).unwrap();
        assert_eq!(config.experiment, "rcp85");
        assert_eq!(config.primary_variable, "huss");
        assert_eq!(config.file_extension(), "nc");
    }

    #[test]
    fn extension_dot_is_optional() {
        let config = CatalogConfig {
            extension: ".nc".to_string(),
            ..Default::default()
        };
        assert_eq!(config.file_extension(), "nc");
    }

    #[test]
    fn rejects_primary_listed_as_complementary() {
        let err = CatalogConfig::from_toml_str(
            r#"
            primary_variable = "tas"
            complementary_variables = ["pr", "tas"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CordexError::Config(_)));
    }

    #[test]
    fn rejects_duplicate_complementary() {
        let config = CatalogConfig {
            complementary_variables: vec!["pr".into(), "pr".into()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CordexError::Config(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = CatalogConfig::from_toml_str("experiment = ").unwrap_err();
        assert!(matches!(err, CordexError::Config(_)));
    }

    #[test]
    fn reads_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.toml");
        std::fs::write(
            &path,
            "root = \"/data/cordex\"\nexperiment = \"rcp45\"\ncomplementary_variables = [\"tas\"]\n",
        )
        .unwrap();

        let config = CatalogConfig::from_file(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("/data/cordex"));
        assert_eq!(config.experiment, "rcp45");
        assert_eq!(config.complementary_variables, vec!["tas".to_string()]);

        let missing = CatalogConfig::from_file(tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, CordexError::Io { .. }));
    }

    #[test]
    fn json_round_trip() {
        let config = CatalogConfig {
            complementary_variables: vec!["tas".into(), "ps".into()],
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: CatalogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
