//! Per-model records for a set of CORDEX simulations
//!
//! Each regional simulation is identified by the regional model, the global model driving
//! it and the CORDEX domain. A [`ModelRecord`] collects the arrays loaded for that
//! simulation together with the climatology derived from them.

use crate::catalog::DatasetName;
use crate::climatology::{monthly_anomaly_series, MonthlyAnomalies};
use crate::errors::{CordexError, CordexResult};
use ndarray::{Array1, Array3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity of one regional simulation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelKey {
    pub model_id: String,
    pub driving_model_id: String,
    pub domain: String,
}

impl ModelKey {
    pub fn new(model_id: &str, driving_model_id: &str, domain: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            driving_model_id: driving_model_id.to_string(),
            domain: domain.to_string(),
        }
    }

    /// Key of the simulation a dataset folder belongs to, if its name has all the fields
    pub fn from_dataset(name: &DatasetName) -> Option<Self> {
        name.components()
            .map(|c| Self::new(&c.model_id, &c.driving_model, &c.domain))
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.model_id, self.driving_model_id, self.domain
        )
    }
}

/// Arrays and derived climatology for one simulation
///
/// Every array starts out empty and is filled in as data is loaded or computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub key: ModelKey,
    pub anomaly_series: Option<Array3<f64>>,
    pub monthly_mean_fit: Option<Array3<f64>>,
    pub monthly_mean: Option<Array3<f64>>,
    pub lat: Option<Array1<f64>>,
    pub lon: Option<Array1<f64>>,
    /// Time coordinate in whatever numeric encoding the source file uses
    pub time: Option<Array1<f64>>,
    /// Primary variable field, shape `(time, lat, lon)`
    pub primary: Option<Array3<f64>>,
}

impl ModelRecord {
    pub fn new(key: ModelKey) -> Self {
        Self {
            key,
            anomaly_series: None,
            monthly_mean_fit: None,
            monthly_mean: None,
            lat: None,
            lon: None,
            time: None,
            primary: None,
        }
    }

    /// Store the primary field with its coordinates
    pub fn set_field(
        &mut self,
        primary: Array3<f64>,
        lat: Array1<f64>,
        lon: Array1<f64>,
        time: Array1<f64>,
    ) {
        self.primary = Some(primary);
        self.lat = Some(lat);
        self.lon = Some(lon);
        self.time = Some(time);
    }

    pub fn set_climatology(&mut self, climatology: MonthlyAnomalies) {
        self.anomaly_series = Some(climatology.anomalies);
        self.monthly_mean_fit = Some(climatology.fitted);
        self.monthly_mean = Some(climatology.monthly_mean);
    }

    /// Compute and store the anomaly decomposition of the primary field
    ///
    /// Requires the primary field and both spatial coordinates to be present.
    pub fn compute_climatology(&mut self) -> CordexResult<()> {
        let missing = |what: &str| {
            CordexError::MissingData(format!("{} has no {} loaded", self.key, what))
        };
        let primary = self.primary.as_ref().ok_or_else(|| missing("primary field"))?;
        let lat = self.lat.as_ref().ok_or_else(|| missing("latitude"))?;
        let lon = self.lon.as_ref().ok_or_else(|| missing("longitude"))?;

        let climatology = monthly_anomaly_series(primary.view(), lat.view(), lon.view())?;
        self.set_climatology(climatology);
        Ok(())
    }
}

/// Records for a set of simulations, keyed by [`ModelKey`] display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRegistry {
    records: BTreeMap<String, ModelRecord>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty record for each key; repeated keys share one record
    pub fn from_keys(keys: impl IntoIterator<Item = ModelKey>) -> Self {
        let mut registry = Self::new();
        for key in keys {
            registry.insert(ModelRecord::new(key));
        }
        registry
    }

    /// Insert a record, replacing any existing record with the same key
    pub fn insert(&mut self, record: ModelRecord) -> Option<ModelRecord> {
        self.records.insert(record.key.to_string(), record)
    }

    pub fn get(&self, name: &str) -> Option<&ModelRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ModelRecord> {
        self.records.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
