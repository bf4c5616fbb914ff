//! Storage types and typed cell values.
//!
//! `StorageType` is the closed set of column types the bridge can infer from
//! delimited text. Each database maps these to its own column types through a
//! [`ToDdl`](crate::ToDdl) implementation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column type inferred from raw delimited text.
///
/// The declaration order is the inference priority: when every non-blank value
/// of a column satisfies more than one type, the earliest one wins. `Text`
/// accepts everything and is always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit IEEE 754 floating point
    Float,
    /// `true` / `false`
    Boolean,
    /// Date or date-time in UTC. Offset-qualified values are converted; values
    /// without an offset are taken as UTC.
    #[serde(rename = "datetime")]
    DateTime,
    /// Arbitrary text, the catch-all
    Text,
}

impl StorageType {
    /// All storage types, in inference priority order.
    pub const INFERENCE_ORDER: [StorageType; 5] = [
        StorageType::Integer,
        StorageType::Float,
        StorageType::Boolean,
        StorageType::DateTime,
        StorageType::Text,
    ];

    /// Lowercase name used in summaries and schema override files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "integer" | "int" => Ok(Self::Integer),
            "float" | "double" => Ok(Self::Float),
            "boolean" | "bool" => Ok(Self::Boolean),
            "datetime" | "timestamp" => Ok(Self::DateTime),
            "text" | "string" => Ok(Self::Text),
            _ => Err(format!(
                "Invalid storage type: '{s}'. Expected one of integer, float, boolean, datetime, text"
            )),
        }
    }
}

/// A single cell after casting from raw text, or as returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Text(String),
    /// Unset value. Blank date-time cells cast to this; queries may return it for any column.
    Null,
}

/// One typed row, ordered like the schema's columns.
pub type Row = Vec<CellValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_order_matches_ord() {
        let mut sorted = StorageType::INFERENCE_ORDER;
        sorted.sort();
        assert_eq!(sorted, StorageType::INFERENCE_ORDER);
        assert_eq!(StorageType::INFERENCE_ORDER.last(), Some(&StorageType::Text));
    }

    #[test]
    fn test_display_and_from_str() {
        for ty in StorageType::INFERENCE_ORDER {
            assert_eq!(ty.to_string().parse::<StorageType>().unwrap(), ty);
        }
        assert_eq!("BOOL".parse::<StorageType>().unwrap(), StorageType::Boolean);
        assert!("blob".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StorageType::DateTime).unwrap();
        assert_eq!(json, "\"datetime\"");
        let ty: StorageType = serde_json::from_str("\"integer\"").unwrap();
        assert_eq!(ty, StorageType::Integer);
    }
}
