use crate::filter::Record;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Record stream error types
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON-lines file into records, one JSON object per line.
/// Blank lines are skipped.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>, ReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_records_from(BufReader::new(file))
}

/// Read records from any buffered reader (files, stdin)
pub fn read_records_from(reader: impl BufRead) -> Result<Vec<Record>, ReadError> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: Record = serde_json::from_str(&line).map_err(|source| ReadError::Json {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_one_record_per_line() {
        let input = "{\"code\":\"A\"}\n\n{\"code\":\"B\"}\n";
        let records = read_records_from(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("code").unwrap(), "B");
    }

    #[test]
    fn test_preserves_field_order() {
        let input = "{\"z\":1,\"a\":2,\"m\":3}\n";
        let records = read_records_from(Cursor::new(input)).unwrap();
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_reports_the_failing_line() {
        let input = "{\"ok\":true}\nnot json\n";
        let error = read_records_from(Cursor::new(input)).unwrap_err();
        assert!(matches!(error, ReadError::Json { line: 2, .. }));
    }

    #[test]
    fn test_non_object_line_is_an_error() {
        let error = read_records_from(Cursor::new("[1,2,3]\n")).unwrap_err();
        assert!(matches!(error, ReadError::Json { line: 1, .. }));
    }
}
