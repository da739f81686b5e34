//! CSV ingest.
//!
//! Turns a CSV file into a `Table`: a header row plus string cells, with missing
//! values already recognised. Numeric conversion happens later, per column role,
//! so that a bad label and a bad feature can be reported differently.
//!
//! Parsing rules follow what pandas' `read_csv` does with default options:
//! - the first record is the header; a UTF-8 BOM on it is stripped
//! - duplicate header names are suffixed (`a`, `a.1`, `a.2`)
//! - blank header names become `Unnamed: <idx>`
//! - short rows are padded with missing cells, long rows are an error
//! - a fixed set of tokens (`NA`, `NaN`, `null`, ...) means "missing"

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::TrainError;

/// Tokens treated as missing values.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// An in-memory CSV table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    /// Row-major cells; `None` is a missing value.
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

/// Load a CSV file from disk.
pub fn load_table(path: &Path) -> Result<Table, TrainError> {
    let file = File::open(path).map_err(|source| TrainError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file, path)
}

/// Parse CSV from any reader. `path` is only used in error messages.
pub fn read_table<R: Read>(reader: R, path: &Path) -> Result<Table, TrainError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| TrainError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    if headers.is_empty() || (headers.len() == 1 && headers.get(0).is_some_and(str::is_empty)) {
        return Err(TrainError::EmptyFile);
    }

    let columns = dedupe_headers(&headers);
    let width = columns.len();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| TrainError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(TrainError::Tokenize {
                expected: width,
                line,
                saw: record.len(),
            });
        }

        let mut row: Vec<Option<String>> = record.iter().map(parse_cell).collect();
        row.resize(width, None);
        rows.push(row);
    }

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = width,
        "loaded CSV table"
    );

    Ok(Table { columns, rows })
}

/// Whether a raw token denotes a missing value.
fn is_na(token: &str) -> bool {
    NA_TOKENS.contains(&token)
}

fn parse_cell(raw: &str) -> Option<String> {
    if is_na(raw) { None } else { Some(raw.to_string()) }
}

fn dedupe_headers(headers: &StringRecord) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        // Spreadsheet exports often prefix the first header with a BOM.
        let name = if idx == 0 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 0usize;
        while out.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}.{suffix}");
        }
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Result<Table, TrainError> {
        read_table(text.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn reads_header_and_rows() {
        let table = parse("a,b,label\n1,2,0\n3,4,1\n").unwrap();
        assert_eq!(table.columns, vec!["a", "b", "label"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.cell(1, 0), Some("3"));
        assert_eq!(table.column_index("label"), Some(2));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    fn strips_bom_and_dedupes_headers() {
        let table = parse("\u{feff}x,x,,x\n1,2,3,4\n").unwrap();
        assert_eq!(table.columns, vec!["x", "x.1", "Unnamed: 2", "x.2"]);
    }

    #[test]
    fn na_tokens_and_short_rows_become_missing() {
        let table = parse("a,b,c\nNA,2\n,null,3\n").unwrap();
        assert_eq!(table.rows[0], vec![None, Some("2".to_string()), None]);
        assert_eq!(table.rows[1], vec![None, None, Some("3".to_string())]);
    }

    #[test]
    fn blank_lines_between_rows_are_skipped() {
        let table = parse("a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.cell(1, 0), Some("3"));
    }

    #[test]
    fn long_rows_are_rejected_with_line_number() {
        let err = parse("a,b\n1,2\n3,4,5\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error tokenizing data. Expected 2 fields in line 3, saw 3"
        );
    }

    #[test]
    fn empty_input_has_no_columns() {
        let err = parse("").unwrap_err();
        assert_eq!(err.to_string(), "No columns to parse from file");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to open CSV '/definitely/not/here.csv'"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "f,label").unwrap();
        writeln!(file, "0.5,yes").unwrap();
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.cell(0, 1), Some("yes"));
    }
}
