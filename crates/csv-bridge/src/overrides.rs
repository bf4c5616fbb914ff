//! Per-column storage type overrides loaded from YAML.
//!
//! ```yaml
//! columns:
//!   zip_code: text
//!   score: float
//! ```

use crate::error::ImportError;
use bridge_core::StorageType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Storage types forced for named columns instead of inferred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeOverrides {
    #[serde(default)]
    pub columns: BTreeMap<String, StorageType>,
}

impl TypeOverrides {
    pub fn from_yaml(content: &str) -> Result<Self, ImportError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn get(&self, column: &str) -> Option<StorageType> {
        self.columns.get(column).copied()
    }

    /// Fail on the first override whose column is not in `columns`.
    pub fn check_columns(&self, columns: &[String]) -> Result<(), ImportError> {
        match self.columns.keys().find(|name| !columns.contains(name)) {
            Some(unknown) => Err(ImportError::UnknownOverrideColumn(unknown.clone())),
            None => Ok(()),
        }
    }
}
