//! Forward conversion: CellValue → CSV string.

use bridge_core::CellValue;

/// Layout for date-time cells. `%.f` prints nothing for whole seconds.
pub const DATETIME_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Render a cell as delimited-file text. Escaping is left to the writer.
pub fn cell_to_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Float(f) => f.to_string(),
        CellValue::DateTime(dt) => dt.format(DATETIME_TEXT_FORMAT).to_string(),
        CellValue::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reverse::cast_cell;
    use bridge_core::StorageType;

    #[test]
    fn test_null_conversion() {
        assert_eq!(cell_to_text(&CellValue::Null), "");
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(cell_to_text(&CellValue::Boolean(true)), "true");
        assert_eq!(cell_to_text(&CellValue::Boolean(false)), "false");
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(cell_to_text(&CellValue::Float(2.5)), "2.5");
        assert_eq!(cell_to_text(&CellValue::Float(-0.125)), "-0.125");
    }

    #[test]
    fn test_datetime_conversion() {
        let whole = cast_cell("2024-06-15T10:30:00", StorageType::DateTime).unwrap();
        assert_eq!(cell_to_text(&whole), "2024-06-15 10:30:00");

        let millis = cast_cell("2024-06-15 10:30:00.250", StorageType::DateTime).unwrap();
        assert_eq!(cell_to_text(&millis), "2024-06-15 10:30:00.250");
    }

    #[test]
    fn test_representable_values_survive_a_cast() {
        let cases = [
            ("42", StorageType::Integer),
            ("-3", StorageType::Integer),
            ("2.5", StorageType::Float),
            ("true", StorageType::Boolean),
            ("false", StorageType::Boolean),
            ("2024-01-02 03:04:05", StorageType::DateTime),
            ("hello, world", StorageType::Text),
        ];
        for (text, ty) in cases {
            let cell = cast_cell(text, ty).unwrap();
            assert_eq!(cell_to_text(&cell), text, "{ty} value {text}");
        }
    }
}
