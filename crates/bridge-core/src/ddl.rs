//! DDL generation from `StorageType`.
//!
//! Each database renders table-creation statements through its own `ToDdl`
//! implementation. [`AnsiDdl`] is the portable default.

use crate::table::TableSchema;
use crate::types::StorageType;

/// Trait for generating DDL for a database dialect.
pub trait ToDdl: Send + Sync {
    /// Column type keyword for a storage type.
    fn type_keyword(&self, storage_type: StorageType) -> &'static str;

    /// Quote an identifier. Identifiers are already validated, so no escaping is needed.
    fn quote(&self, identifier: &str) -> String {
        format!("\"{identifier}\"")
    }

    /// Clause appended after the column list, such as a storage engine.
    fn table_options(&self) -> Option<&'static str> {
        None
    }

    /// Render a create-if-absent statement. Columns appear in schema order.
    fn create_table(&self, schema: &TableSchema) -> String {
        let column_defs: Vec<String> = schema
            .columns
            .iter()
            .map(|c| {
                format!(
                    "{} {}",
                    self.quote(c.name.as_str()),
                    self.type_keyword(c.storage_type)
                )
            })
            .collect();

        let statement = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.quote(schema.table.as_str()),
            column_defs.join(", ")
        );

        match self.table_options() {
            Some(options) => format!("{statement} {options}"),
            None => statement,
        }
    }
}

/// ANSI-style DDL generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDdl;

impl ToDdl for AnsiDdl {
    fn type_keyword(&self, storage_type: StorageType) -> &'static str {
        match storage_type {
            StorageType::Integer => "BIGINT",
            StorageType::Float => "DOUBLE PRECISION",
            StorageType::Boolean => "BOOLEAN",
            StorageType::DateTime => "TIMESTAMP",
            StorageType::Text => "TEXT",
        }
    }
}
