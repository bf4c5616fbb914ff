//! ClickHouse DDL generation from StorageType.

use bridge_core::{StorageType, ToDdl};

/// ClickHouse DDL generator.
///
/// Tables use `MergeTree` without a sorting key, which suits append-only imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickHouseDdl;

impl ToDdl for ClickHouseDdl {
    fn type_keyword(&self, storage_type: StorageType) -> &'static str {
        match storage_type {
            StorageType::Integer => "Int64",
            StorageType::Float => "Float64",
            StorageType::Boolean => "Bool",
            // Cells are UTC; blank cells are inserted as NULL
            StorageType::DateTime => "Nullable(DateTime64(3, 'UTC'))",
            StorageType::Text => "String",
        }
    }

    fn quote(&self, identifier: &str) -> String {
        format!("`{identifier}`")
    }

    fn table_options(&self) -> Option<&'static str> {
        Some("ENGINE = MergeTree ORDER BY tuple()")
    }
}
