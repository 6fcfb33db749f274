//! CSV reading and writing.
//!
//! Input files are read into loosely typed rows keyed by header name; the
//! validator turns them into records. Output files are written with an
//! explicit header row so empty reports still carry their columns.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// A single input row, keyed by column header.
pub type Row = BTreeMap<String, String>;

/// Errors raised while reading or writing CSV files.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse a CSV file.
    #[error("Error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize or write a CSV file.
    #[error("Error writing file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to create the output directory or flush the file.
    #[error("Error writing file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a CSV file with a header row into a vector of rows.
///
/// A BOM on the first header is dropped and values are trimmed. Rows shorter
/// than the header simply lack the trailing keys.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, CsvError> {
    if !path.exists() {
        return Err(CsvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let read_err = |source| CsvError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value.trim().to_string()))
            .collect();
        rows.push(row);
    }

    info!(
        path = %path.display(),
        records = rows.len(),
        "Successfully read CSV file"
    );
    Ok(rows)
}

/// Write records to a CSV file under the given header row.
///
/// Parent directories are created when missing. `headers` must list the
/// columns in the same order as the fields of `T`.
pub fn write_records<T: Serialize>(
    path: &Path,
    headers: &[&str],
    records: &[T],
) -> Result<(), CsvError> {
    ensure_parent_dir(path)?;

    let write_err = |source| CsvError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_err)?;

    writer.write_record(headers).map_err(write_err)?;
    for record in records {
        writer.serialize(record).map_err(write_err)?;
    }
    writer.flush().map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Successfully wrote CSV file"
    );
    Ok(())
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), CsvError> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if dir.exists() {
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Created directory: {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Pair {
        id: String,
        count: u64,
    }

    #[test]
    fn test_read_rows_trims_and_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("votes.csv");
        std::fs::write(&path, "\u{feff}id,bill_id\n v1 ,b1\nv2,b2\n").unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id").map(String::as_str), Some("v1"));
        assert_eq!(rows[1].get("bill_id").map(String::as_str), Some("b2"));
    }

    #[test]
    fn test_read_rows_handles_quoted_commas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bills.csv");
        std::fs::write(&path, "id,title,sponsor_id\nb1,\"Taxes, and more\",l1\n").unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(
            rows[0].get("title").map(String::as_str),
            Some("Taxes, and more")
        );
    }

    #[test]
    fn test_read_rows_short_row_lacks_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legislators.csv");
        std::fs::write(&path, "id,name\nl1\n").unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows[0].get("id").map(String::as_str), Some("l1"));
        assert!(!rows[0].contains_key("name"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_rows(&dir.path().join("nope.csv")).unwrap_err();

        assert!(matches!(err, CsvError::FileNotFound { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_write_records_creates_dirs_and_headers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/pairs.csv");
        let records = vec![
            Pair {
                id: "a".to_string(),
                count: 1,
            },
            Pair {
                id: "b, c".to_string(),
                count: 2,
            },
        ];

        write_records(&path, &["id", "count"], &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,count\na,1\n\"b, c\",2\n");
    }

    #[test]
    fn test_write_empty_records_keeps_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        write_records::<Pair>(&path, &["id", "count"], &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id,count\n");
    }
}
