use log_sieve::{FilterExpression, read_records};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_read_and_filter_a_log_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"level":"warn","code":"CIRCULAR_DEPENDENCY","message":"circular import"}}"#).unwrap();
    writeln!(file).unwrap();
    writeln!(file, r#"{{"level":"info","code":"EMPTY_BUNDLE","message":"nothing to do"}}"#).unwrap();

    let records = read_records(file.path()).unwrap();
    assert_eq!(records.len(), 2);

    let expr = FilterExpression::compile(&["code:CIRCULAR*"]).unwrap();
    let matched: Vec<_> = records.iter().filter(|r| expr.matches(r)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].get("level").unwrap(), "warn");
}

#[test]
fn test_field_order_survives_into_object_rules() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"loc":{{"file":"main.js","line":1}}}}"#).unwrap();
    writeln!(file, r#"{{"loc":{{"line":1,"file":"main.js"}}}}"#).unwrap();

    let records = read_records(file.path()).unwrap();
    let expr = FilterExpression::compile(&["loc:{file:'main.js', *}"]).unwrap();

    assert!(expr.matches(&records[0]));
    assert!(!expr.matches(&records[1]));
}

#[test]
fn test_missing_file_is_an_open_error() {
    let result = read_records("/nonexistent/build.jsonl");
    assert!(matches!(result, Err(log_sieve::ReadError::Open { .. })));
}
