//! Export tests against an in-memory sink.

mod common;

use bridge_core::CellValue;
use chrono::NaiveDate;
use common::RecordingSink;
use csv_bridge::{export_query, export_table, ExportError, ExportOptions};
use table_sink::{QueryColumn, QueryResult};

fn column(name: &str, type_name: &str) -> QueryColumn {
    QueryColumn {
        name: name.to_string(),
        type_name: type_name.to_string(),
    }
}

fn sample_result() -> QueryResult {
    let seen = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    QueryResult {
        columns: vec![
            column("id", "Int64"),
            column("note", "String"),
            column("seen", "Nullable(DateTime64(3))"),
        ],
        rows: vec![
            vec![
                CellValue::Integer(1),
                CellValue::Text("hello, world".to_string()),
                CellValue::DateTime(seen),
            ],
            vec![
                CellValue::Integer(2),
                CellValue::Text("plain".to_string()),
                CellValue::Null,
            ],
        ],
    }
}

#[tokio::test]
async fn test_export_query_writes_header_and_rows() {
    let sink = RecordingSink::with_query_result(sample_result());
    let mut out = Vec::new();

    let count = export_query(&sink, "SELECT 1", &mut out, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "id,note,seen\n1,\"hello, world\",2024-01-15 10:30:00\n2,plain,\n"
    );
}

#[tokio::test]
async fn test_export_without_header_and_custom_delimiter() {
    let sink = RecordingSink::with_query_result(sample_result());
    let mut out = Vec::new();
    let options = ExportOptions {
        delimiter: b'\t',
        has_headers: false,
    };

    export_query(&sink, "SELECT 1", &mut out, &options)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1\thello, world\t2024-01-15 10:30:00\n2\tplain\t\n"
    );
}

#[tokio::test]
async fn test_export_table_quotes_name() {
    let sink = RecordingSink::with_query_result(QueryResult::default());
    let mut out = Vec::new();

    let count = export_table(&sink, "events", &mut out, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert_eq!(
        sink.queries.lock().unwrap().as_slice(),
        &["SELECT * FROM \"events\"".to_string()]
    );
}

#[tokio::test]
async fn test_export_table_rejects_bad_name() {
    let sink = RecordingSink::new();
    let mut out = Vec::new();

    let err = export_table(&sink, "events; DROP", &mut out, &ExportOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::InvalidIdentifier(_)));
    assert!(sink.queries.lock().unwrap().is_empty());
}
