//! Storage type inference for raw columns.
//!
//! A column gets the first type in [`StorageType::INFERENCE_ORDER`] that every
//! non-blank value satisfies. Values are trimmed before they are classified.

use crate::reverse::{parse_bool, parse_datetime};
use bridge_core::StorageType;

/// True for cells that are empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether a single trimmed, non-blank value satisfies `storage_type`.
pub fn accepts(storage_type: StorageType, value: &str) -> bool {
    match storage_type {
        // i64 parsing rejects decimal points and exponents
        StorageType::Integer => value.parse::<i64>().is_ok(),
        // Require a digit so "inf" and "NaN" stay text, and a finite result so "1e999" does too
        StorageType::Float => {
            value.bytes().any(|b| b.is_ascii_digit())
                && value.parse::<f64>().is_ok_and(f64::is_finite)
        }
        StorageType::Boolean => parse_bool(value).is_some(),
        StorageType::DateTime => parse_datetime(value).is_some(),
        StorageType::Text => true,
    }
}

/// Infer the storage type of one column from all of its raw values.
///
/// Empty and all-blank columns are `Text`.
pub fn infer_storage_type<'a, I>(values: I) -> StorageType
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = values
        .into_iter()
        .filter(|v| !is_blank(v))
        .map(str::trim)
        .collect();

    if present.is_empty() {
        return StorageType::Text;
    }

    StorageType::INFERENCE_ORDER
        .into_iter()
        .find(|ty| present.iter().all(|v| accepts(*ty, v)))
        .unwrap_or(StorageType::Text)
}
