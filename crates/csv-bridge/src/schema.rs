//! Schema building: RawTable → TableSchema → DDL.

use crate::error::ImportError;
use crate::overrides::TypeOverrides;
use bridge_core::{ColumnSchema, Identifier, RawTable, TableSchema, ToDdl};
use csv_types::infer_storage_type;
use std::collections::HashSet;
use table_sink::TableSink;
use tracing::{debug, info};

/// A schema and the statement that creates its table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPlan {
    pub schema: TableSchema,
    pub ddl: String,
}

/// Infer a schema for `raw`, to be created as `table_name`.
pub fn build_schema(raw: &RawTable, table_name: &str) -> Result<TableSchema, ImportError> {
    build_schema_with_overrides(raw, table_name, None)
}

/// Infer a schema for `raw`, forcing the types named in `overrides`.
///
/// Checks run in order: table name, empty input, column names (validity,
/// then uniqueness), overrides.
pub fn build_schema_with_overrides(
    raw: &RawTable,
    table_name: &str,
    overrides: Option<&TypeOverrides>,
) -> Result<TableSchema, ImportError> {
    let table = Identifier::parse(table_name)?;

    if raw.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(raw.column_count());
    for column in raw.columns() {
        let name = Identifier::parse(column)?;
        if !seen.insert(column.as_str()) {
            return Err(ImportError::DuplicateColumn(column.clone()));
        }
        names.push(name);
    }

    if let Some(overrides) = overrides {
        overrides.check_columns(raw.columns())?;
    }

    let columns = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let storage_type = match overrides.and_then(|o| o.get(name.as_str())) {
                Some(forced) => forced,
                None => infer_storage_type(raw.column_values(index)),
            };
            debug!("Column {} inferred as {}", name, storage_type);
            ColumnSchema::new(name, storage_type)
        })
        .collect();

    Ok(TableSchema::new(table, columns))
}

/// Build the schema and render its DDL in `dialect`.
pub fn plan_import(
    raw: &RawTable,
    table_name: &str,
    overrides: Option<&TypeOverrides>,
    dialect: &dyn ToDdl,
) -> Result<ImportPlan, ImportError> {
    let schema = build_schema_with_overrides(raw, table_name, overrides)?;
    let ddl = dialect.create_table(&schema);
    Ok(ImportPlan { schema, ddl })
}

/// Execute the plan's DDL. A rejected statement aborts the import.
pub async fn create_table<S: TableSink + ?Sized>(
    sink: &S,
    plan: &ImportPlan,
) -> Result<(), ImportError> {
    info!("Creating table {} if absent", plan.schema.table);
    sink.execute_statement(&plan.ddl)
        .await
        .map_err(ImportError::SchemaCreationFailed)
}
