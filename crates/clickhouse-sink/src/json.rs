//! CellValue <-> JSON conversion for the JSONEachRow / JSONCompact formats.

use bridge_core::CellValue;
use csv_types::forward::DATETIME_TEXT_FORMAT;
use csv_types::parse_datetime;
use serde_json::Value;

/// Convert a cell to the JSON value ClickHouse expects in `JSONEachRow` input.
///
/// Date-times are sent as `YYYY-MM-DD hh:mm:ss[.fff]` text. Non-finite floats
/// become `null`.
pub fn cell_to_json(value: &CellValue) -> Value {
    match value {
        CellValue::Null => Value::Null,
        CellValue::Boolean(b) => Value::Bool(*b),
        CellValue::Integer(i) => Value::from(*i),
        CellValue::Float(f) => Value::from(*f),
        CellValue::DateTime(dt) => Value::String(dt.format(DATETIME_TEXT_FORMAT).to_string()),
        CellValue::Text(s) => Value::String(s.clone()),
    }
}

/// Convert a `JSONCompact` output value to a cell, using the column's ClickHouse type.
pub fn json_to_cell(value: &Value, type_name: &str) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => n
                .as_f64()
                .map(CellValue::Float)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
        },
        Value::String(s) => string_to_cell(s, type_name),
        // Arrays, tuples and maps are exported as their JSON text
        other => CellValue::Text(other.to_string()),
    }
}

fn string_to_cell(s: &str, type_name: &str) -> CellValue {
    if type_name.contains("Date") {
        if let Some(dt) = parse_datetime(s) {
            return CellValue::DateTime(dt);
        }
    }
    // 64-bit integers may still be quoted when the server ignores the output setting
    if type_name.contains("Int") {
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
    }
    CellValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_cell_to_json() {
        assert_eq!(cell_to_json(&CellValue::Integer(5)), json!(5));
        assert_eq!(cell_to_json(&CellValue::Float(2.5)), json!(2.5));
        assert_eq!(cell_to_json(&CellValue::Float(f64::NAN)), Value::Null);
        assert_eq!(cell_to_json(&CellValue::Boolean(true)), json!(true));
        assert_eq!(cell_to_json(&CellValue::Text("a".into())), json!("a"));
        assert_eq!(cell_to_json(&CellValue::Null), Value::Null);

        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(12, 0, 5, 120)
            .unwrap();
        assert_eq!(
            cell_to_json(&CellValue::DateTime(dt)),
            json!("2024-03-01 12:00:05.120")
        );
    }

    #[test]
    fn test_json_to_cell_by_type() {
        assert_eq!(json_to_cell(&json!(7), "Int64"), CellValue::Integer(7));
        assert_eq!(json_to_cell(&json!("7"), "UInt64"), CellValue::Integer(7));
        assert_eq!(json_to_cell(&json!(1.5), "Float64"), CellValue::Float(1.5));
        assert_eq!(json_to_cell(&json!(true), "Bool"), CellValue::Boolean(true));
        assert_eq!(
            json_to_cell(&json!(null), "Nullable(String)"),
            CellValue::Null
        );
        assert_eq!(
            json_to_cell(&json!("2024-03-01 12:00:05"), "DateTime"),
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .and_hms_opt(12, 0, 5)
                    .unwrap()
            )
        );
        assert_eq!(
            json_to_cell(&json!("2024-03-01"), "String"),
            CellValue::Text("2024-03-01".to_string())
        );
        assert_eq!(
            json_to_cell(&json!([1, 2]), "Array(UInt8)"),
            CellValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn test_unsigned_beyond_i64_becomes_float() {
        let cell = json_to_cell(&json!(u64::MAX), "UInt64");
        assert!(matches!(cell, CellValue::Float(_)));
    }
}
