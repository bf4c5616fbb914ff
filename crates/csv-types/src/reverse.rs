//! Reverse conversion: CSV string → CellValue.
//!
//! Values are trimmed before parsing. `Text` cells keep their original
//! whitespace. Blank cells become the type's sentinel: `0` for numbers,
//! `false` for booleans, `Null` for date-times and `""` for text.

use crate::infer::is_blank;
use bridge_core::{CellValue, StorageType};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Error type for CSV cast failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to parse '{value}' as {expected}")]
pub struct CastError {
    pub value: String,
    pub expected: StorageType,
}

/// Naive date-time layouts tried after RFC 3339, in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601-like date or date-time.
///
/// Offsets are applied and the result is expressed in UTC. Date-only values
/// are midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ndt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Cast one raw cell to `storage_type`.
pub fn cast_cell(raw: &str, storage_type: StorageType) -> Result<CellValue, CastError> {
    if is_blank(raw) {
        return Ok(match storage_type {
            StorageType::Integer => CellValue::Integer(0),
            StorageType::Float => CellValue::Float(0.0),
            StorageType::Boolean => CellValue::Boolean(false),
            StorageType::DateTime => CellValue::Null,
            StorageType::Text => CellValue::Text(String::new()),
        });
    }

    let value = raw.trim();
    let cast_error = || CastError {
        value: raw.to_string(),
        expected: storage_type,
    };

    match storage_type {
        StorageType::Integer => value
            .parse::<i64>()
            .map(CellValue::Integer)
            .map_err(|_| cast_error()),
        // Infinities would reach the sink as NULL and be stored as 0
        StorageType::Float => value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(CellValue::Float)
            .ok_or_else(cast_error),
        StorageType::Boolean => parse_bool(value)
            .map(CellValue::Boolean)
            .ok_or_else(cast_error),
        StorageType::DateTime => parse_datetime(value)
            .map(CellValue::DateTime)
            .ok_or_else(cast_error),
        StorageType::Text => Ok(CellValue::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[test]
    fn test_cast_integer() {
        assert_eq!(
            cast_cell("42", StorageType::Integer).unwrap(),
            CellValue::Integer(42)
        );
        assert_eq!(
            cast_cell(" -7 ", StorageType::Integer).unwrap(),
            CellValue::Integer(-7)
        );
    }

    #[test]
    fn test_cast_float() {
        assert_eq!(
            cast_cell("2.5", StorageType::Float).unwrap(),
            CellValue::Float(2.5)
        );
        assert_eq!(
            cast_cell("3", StorageType::Float).unwrap(),
            CellValue::Float(3.0)
        );
    }

    #[test]
    fn test_cast_float_rejects_non_finite() {
        let err = cast_cell("1e999", StorageType::Float).unwrap_err();
        assert_eq!(
            err,
            CastError {
                value: "1e999".to_string(),
                expected: StorageType::Float
            }
        );
        assert!(cast_cell("inf", StorageType::Float).is_err());
        assert!(cast_cell("NaN", StorageType::Float).is_err());
    }

    #[test]
    fn test_cast_bool() {
        assert_eq!(
            cast_cell("TRUE", StorageType::Boolean).unwrap(),
            CellValue::Boolean(true)
        );
        assert_eq!(
            cast_cell("false", StorageType::Boolean).unwrap(),
            CellValue::Boolean(false)
        );
    }

    #[test]
    fn test_cast_datetime_variants() {
        assert_eq!(
            cast_cell("2024-06-15", StorageType::DateTime).unwrap(),
            CellValue::DateTime(datetime(2024, 6, 15, 0, 0, 0, 0))
        );
        assert_eq!(
            cast_cell("2024-06-15T10:30:00.5", StorageType::DateTime).unwrap(),
            CellValue::DateTime(datetime(2024, 6, 15, 10, 30, 0, 500))
        );
        assert_eq!(
            cast_cell("2024-06-15T10:30:00+02:00", StorageType::DateTime).unwrap(),
            CellValue::DateTime(datetime(2024, 6, 15, 8, 30, 0, 0))
        );
        assert_eq!(
            cast_cell("2024-06-15 10:30", StorageType::DateTime).unwrap(),
            CellValue::DateTime(datetime(2024, 6, 15, 10, 30, 0, 0))
        );
    }

    #[test]
    fn test_blank_sentinels() {
        assert_eq!(
            cast_cell("", StorageType::Integer).unwrap(),
            CellValue::Integer(0)
        );
        assert_eq!(
            cast_cell(" ", StorageType::Float).unwrap(),
            CellValue::Float(0.0)
        );
        assert_eq!(
            cast_cell("", StorageType::Boolean).unwrap(),
            CellValue::Boolean(false)
        );
        assert_eq!(
            cast_cell("", StorageType::DateTime).unwrap(),
            CellValue::Null
        );
        assert_eq!(
            cast_cell("  ", StorageType::Text).unwrap(),
            CellValue::Text(String::new())
        );
    }

    #[test]
    fn test_text_keeps_whitespace() {
        assert_eq!(
            cast_cell("  padded ", StorageType::Text).unwrap(),
            CellValue::Text("  padded ".to_string())
        );
    }

    #[test]
    fn test_cast_errors_name_value_and_type() {
        let err = cast_cell("abc", StorageType::Integer).unwrap_err();
        assert_eq!(
            err,
            CastError {
                value: "abc".to_string(),
                expected: StorageType::Integer
            }
        );
        assert_eq!(err.to_string(), "Failed to parse 'abc' as integer");
        assert!(cast_cell("yes", StorageType::Boolean).is_err());
        assert!(cast_cell("15/06/2024", StorageType::DateTime).is_err());
    }
}
