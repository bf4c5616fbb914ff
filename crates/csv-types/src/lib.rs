//! CSV type conversions for bridge-core types.
//!
//! This crate turns raw delimited text into typed values and back.
//!
//! # Modules
//!
//! - [`infer`] - Raw column text → `StorageType`
//! - [`reverse`] - Raw cell text → `CellValue`, given a `StorageType`
//! - [`forward`] - `CellValue` → cell text
//!
//! # Example
//!
//! ```
//! use bridge_core::{CellValue, StorageType};
//! use csv_types::{cast_cell, cell_to_text, infer_storage_type};
//!
//! let ty = infer_storage_type(["1", "2", ""]);
//! assert_eq!(ty, StorageType::Integer);
//!
//! let cell = cast_cell("42", ty).unwrap();
//! assert_eq!(cell, CellValue::Integer(42));
//! assert_eq!(cell_to_text(&cell), "42");
//! ```

pub mod forward;
pub mod infer;
pub mod reverse;

pub use forward::cell_to_text;
pub use infer::{accepts, infer_storage_type, is_blank};
pub use reverse::{cast_cell, parse_datetime, CastError};
