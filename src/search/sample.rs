// src/search/sample.rs
use crate::domain::{Property, PropertyId};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

const BUNDLED_JSON: &str = include_str!("../../data/properties.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("dataset is not a JSON array: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only listings used when the primary store has nothing to serve,
/// and by the search client when the API cannot be reached.
#[derive(Debug, Clone, Default)]
pub struct SampleDataset {
    properties: Vec<Property>,
}

impl SampleDataset {
    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_JSON)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_json(&raw)?;
        info!(path = %path.display(), count = dataset.len(), "loaded sample dataset");
        Ok(dataset)
    }

    /// `None` selects the bundled dataset.
    pub fn load(path: Option<&Path>) -> Result<Self, DatasetError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::bundled(),
        }
    }

    /// Parse a JSON array of listings. Records that do not fit the
    /// listing shape are skipped with a warning.
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let records: Vec<Value> = serde_json::from_str(raw)?;

        let properties = records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| match serde_json::from_value::<Property>(record) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(index = idx, error = %e, "skipping malformed sample record");
                    None
                }
            })
            .collect();

        Ok(Self { properties })
    }

    pub fn from_properties(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    pub fn all(&self) -> &[Property] {
        &self.properties
    }

    pub fn find(&self, id: &PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
